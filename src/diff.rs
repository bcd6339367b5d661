use crate::{
    breakpoints::Breakpoint,
    extract::{StyleProperty, StyleRecord},
};

/// What to do with a property that was set at a narrower tier and is gone at a wider one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Emit nothing; the narrower tier's value keeps cascading.
    #[default]
    Ignore,
    /// Emit `<prop>: unset` at the wider tier.
    Unset,
}

pub const UNSET: &str = "unset";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TierDiff {
    pub breakpoint: Breakpoint,
    pub changes: StyleRecord,
}

/// Per-tier changed declarations, in emission order. Tiers without changes are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct MediaQueryMap {
    tiers: Vec<TierDiff>,
}

impl MediaQueryMap {
    pub fn tiers(&self) -> &[TierDiff] {
        &self.tiers
    }

    pub fn get(&self, name: &str) -> Option<&StyleRecord> {
        self.tiers
            .iter()
            .find(|t| t.breakpoint.name == name)
            .map(|t| &t.changes)
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Every property that changed at some tier, in property order.
    pub fn used_properties(&self) -> Vec<StyleProperty> {
        let mut used: Vec<StyleProperty> = self
            .tiers
            .iter()
            .flat_map(|t| t.changes.properties())
            .collect();
        used.sort();
        used.dedup();
        used
    }
}

/// Sort tiers ascending by minimum width, then diff each against its predecessor.
pub fn compute_diffs(
    tiers: impl IntoIterator<Item = (Breakpoint, StyleRecord)>,
    removal: RemovalPolicy,
) -> MediaQueryMap {
    let mut tiers: Vec<(Breakpoint, StyleRecord)> = tiers.into_iter().collect();
    tiers.sort_by_key(|(bp, _)| bp.min_width);
    diff_in_order(tiers, removal)
}

/// Diff tiers in the order given. The first tier is compared against an empty record.
pub fn diff_in_order(
    tiers: impl IntoIterator<Item = (Breakpoint, StyleRecord)>,
    removal: RemovalPolicy,
) -> MediaQueryMap {
    let mut out = Vec::new();
    let mut prev = StyleRecord::new();

    for (breakpoint, current) in tiers {
        let changes = diff_records(&prev, &current, removal);
        if !changes.is_empty() {
            out.push(TierDiff {
                breakpoint,
                changes,
            });
        }
        prev = current;
    }

    MediaQueryMap { tiers: out }
}

/// Declarations needed to go from `prev` to `current`.
pub fn diff_records(
    prev: &StyleRecord,
    current: &StyleRecord,
    removal: RemovalPolicy,
) -> StyleRecord {
    let mut changes: StyleRecord = current
        .iter()
        .filter(|(prop, value)| prev.get(*prop) != Some(*value))
        .map(|(prop, value)| (prop, value.to_string()))
        .collect();

    if removal == RemovalPolicy::Unset {
        for (prop, _) in prev.iter() {
            if !current.contains(prop) {
                changes.insert(prop, UNSET);
            }
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pairs: &[(StyleProperty, &str)]) -> StyleRecord {
        pairs.iter().map(|(p, v)| (*p, v.to_string())).collect()
    }

    fn bp(name: &str, w: u32) -> Breakpoint {
        Breakpoint::new(name, w)
    }

    #[test]
    fn first_tier_diffs_against_empty() {
        let s1 = rec(&[(StyleProperty::Width, "a")]);
        let m = compute_diffs([(bp("base", 1024), s1.clone())], RemovalPolicy::Ignore);
        assert_eq!(m.get("base"), Some(&s1));
    }

    #[test]
    fn unchanged_tier_is_skipped_and_next_diffs_against_it() {
        let s1 = rec(&[(StyleProperty::Width, "a"), (StyleProperty::Gap, "g")]);
        let s2 = s1.clone();
        let s3 = rec(&[(StyleProperty::Width, "b"), (StyleProperty::Gap, "g")]);
        let m = compute_diffs(
            [
                (bp("l", 1920), s3),
                (bp("base", 1024), s1),
                (bp("md", 1440), s2),
            ],
            RemovalPolicy::Ignore,
        );
        assert_eq!(m.tiers().len(), 2);
        assert!(m.get("md").is_none());
        assert_eq!(m.get("l"), Some(&rec(&[(StyleProperty::Width, "b")])));
    }

    #[test]
    fn explicit_order_is_respected() {
        let narrow = rec(&[(StyleProperty::Width, "a")]);
        let wide = rec(&[(StyleProperty::Width, "b")]);
        let m = diff_in_order(
            [(bp("wide", 1440), wide), (bp("narrow", 1024), narrow.clone())],
            RemovalPolicy::Ignore,
        );
        let names: Vec<_> = m.tiers().iter().map(|t| t.breakpoint.name.as_str()).collect();
        assert_eq!(names, ["wide", "narrow"]);
        assert_eq!(m.get("narrow"), Some(&narrow));
    }

    #[test]
    fn removed_properties_follow_policy() {
        let s1 = rec(&[(StyleProperty::Width, "a"), (StyleProperty::LetterSpacing, "x")]);
        let s2 = rec(&[(StyleProperty::Width, "a")]);
        let tiers = [(bp("base", 1024), s1), (bp("md", 1440), s2)];

        let ignored = compute_diffs(tiers.clone(), RemovalPolicy::Ignore);
        assert!(ignored.get("md").is_none());

        let unset = compute_diffs(tiers, RemovalPolicy::Unset);
        assert_eq!(
            unset.get("md"),
            Some(&rec(&[(StyleProperty::LetterSpacing, UNSET)]))
        );
    }

    #[test]
    fn reappearing_property_is_a_change() {
        let with = rec(&[(StyleProperty::Gap, "g")]);
        let without = StyleRecord::new();
        let m = compute_diffs(
            [
                (bp("base", 1024), with.clone()),
                (bp("md", 1440), without),
                (bp("l", 1920), with.clone()),
            ],
            RemovalPolicy::Ignore,
        );
        assert_eq!(m.get("l"), Some(&with));
    }

    #[test]
    fn used_properties_are_deduplicated() {
        let m = compute_diffs(
            [
                (
                    bp("base", 1024),
                    rec(&[(StyleProperty::Padding, "p"), (StyleProperty::Width, "a")]),
                ),
                (
                    bp("md", 1440),
                    rec(&[(StyleProperty::Padding, "q"), (StyleProperty::Width, "a")]),
                ),
            ],
            RemovalPolicy::Ignore,
        );
        assert_eq!(
            m.used_properties(),
            vec![StyleProperty::Width, StyleProperty::Padding]
        );
    }
}
