use respondiff::{
    AllowList, Config, Event, EventDef, Notice, Scene, Session, StyleProperty, Transition,
};

fn landing() -> Scene {
    Scene::from_reader(include_str!("data/landing.json").as_bytes()).unwrap()
}

fn config() -> Config {
    Config::from_reader(include_str!("data/config.json").as_bytes()).unwrap()
}

fn events(scene: &Scene) -> Vec<Event> {
    let defs: Vec<EventDef> = serde_json::from_str(include_str!("data/events.json")).unwrap();
    defs.into_iter().map(|d| d.resolve(scene).unwrap()).collect()
}

fn keys(scene: &Scene, ids: &[respondiff::NodeId]) -> Vec<String> {
    ids.iter()
        .map(|&id| scene.key(id).unwrap().to_string())
        .collect()
}

#[test]
fn scripted_session() {
    let scene = landing();
    let mut session = Session::new(config());
    let mut outcomes = Vec::new();
    for event in events(&scene) {
        let Transition {
            session: next,
            outcome,
        } = session.apply(&scene, event);
        session = next;
        outcomes.push(outcome);
    }
    assert_eq!(outcomes.len(), 8);

    // Single selection captures everything the card offers.
    let m0 = outcomes[0].message.as_ref().unwrap();
    assert_eq!(
        m0.selected_fields,
        vec![
            StyleProperty::Width,
            StyleProperty::BorderRadius,
            StyleProperty::Gap,
            StyleProperty::Padding
        ]
    );
    assert!(m0.css.starts_with("/* Base styles (1024px) */\n"));
    assert!(!m0.css.contains("@media"));

    let m1 = outcomes[1].message.as_ref().unwrap();
    assert!(m1.css.contains("@media (min-width: 1440px) {\n  padding: to_rem(16) to_rem(24);\n}"));
    assert!(m1.breakpoints.iter().all(|b| b.active));
    assert!(m1.can_go_back);

    let m2 = outcomes[2].message.as_ref().unwrap();
    assert!(!m2.css.contains("border-radius"));
    assert!(!m2.css.contains("gap"));
    assert_eq!(m2.used_props, vec![StyleProperty::Width, StyleProperty::Padding]);

    let m3 = outcomes[3].message.as_ref().unwrap();
    assert!(m3.pixels);
    assert!(m3.css.contains("padding: 24px 32px;"));
    assert!(!m3.css.contains("to_rem"));

    assert_eq!(
        keys(&scene, outcomes[4].select.as_ref().unwrap()),
        ["title-1280", "title-1440", "title-1920"]
    );
    let m4 = outcomes[4].message.as_ref().unwrap();
    assert!(m4.css.contains("font-size: 24px;"));
    assert!(m4.selected_fields.contains(&StyleProperty::LetterSpacing));

    assert_eq!(
        keys(&scene, outcomes[5].select.as_ref().unwrap()),
        ["title-1920"]
    );
    let m5 = outcomes[5].message.as_ref().unwrap();
    assert!(m5.css.starts_with("@media (min-width: 1920px) {\n"));

    assert_eq!(
        keys(&scene, outcomes[6].select.as_ref().unwrap()),
        ["title-1280", "title-1440", "title-1920"]
    );
    assert!(outcomes[6].message.as_ref().unwrap().can_go_forward);

    assert!(outcomes[7].message.is_none());
    assert_eq!(
        outcomes[7].notices,
        vec![Notice::NoNavigationTarget {
            direction: respondiff::Direction::Down
        }]
    );
    assert_eq!(keys(&scene, session.selection()).len(), 3);
}

#[test]
fn refresh_is_idempotent() {
    let scene = landing();
    let selection = ["card-1280", "card-1440", "card-1920"]
        .iter()
        .map(|k| scene.find(k).unwrap())
        .collect();
    let mut session = Session::new(config())
        .apply(&scene, Event::SelectionChanged(selection))
        .session;
    let (first, _) = session.refresh(&scene);
    let (second, _) = session.refresh(&scene);
    assert_eq!(first, second);
    assert_eq!(session.allow_list(), &AllowList::Unrestricted);
}

#[test]
fn ui_message_uses_camel_case() {
    let scene = landing();
    let t = Session::new(config()).apply(
        &scene,
        Event::SelectionChanged(vec![scene.find("card-1280").unwrap()]),
    );
    let v = serde_json::to_value(t.outcome.message.unwrap()).unwrap();
    assert_eq!(v["availableProps"][0], "width");
    assert_eq!(v["breakpoints"][0]["minWidth"], 1024);
    assert_eq!(v["breakpoints"][0]["active"], true);
    assert_eq!(v["canGoBack"], false);
    assert!(v["css"].as_str().unwrap().contains("gap: to_rem(12);"));
}

#[test]
fn stepping_back_to_one_card_keeps_the_field_choice() {
    let scene = landing();
    let one = vec![scene.find("card-1280").unwrap()];
    let two = vec![one[0], scene.find("card-1440").unwrap()];

    let session = Session::new(config())
        .apply(&scene, Event::SelectionChanged(one))
        .session
        .apply(&scene, Event::SelectionChanged(two))
        .session
        .apply(&scene, Event::FieldsUpdated(vec!["width".into()]))
        .session;
    let t = session.apply(&scene, Event::HistoryStep(respondiff::HistoryDirection::Back));

    assert_eq!(keys(&scene, t.outcome.select.as_ref().unwrap()), ["card-1280"]);
    assert_eq!(t.session.allow_list(), &AllowList::only([StyleProperty::Width]));
    let css = &t.outcome.message.as_ref().unwrap().css;
    assert_eq!(css, "/* Base styles (1024px) */\nwidth: to_rem(400);\n\n");
}
