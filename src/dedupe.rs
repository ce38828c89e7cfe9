//! Disambiguation of clashing icon names.

use std::collections::HashSet;

use tracing::warn;

use crate::types::IconRecord;

/// Appended to an icon name that clashes with an earlier icon.
pub const DUPLICATE_SUFFIX: &str = "-duplicate-name";

/// Renames later icons whose name was already taken by an earlier one.
///
/// Order and length are preserved and the first occurrence of a name is never
/// touched. Each clashing icon gets the suffix once; if the suffixed name is
/// also taken it is suffixed once more relative to that, and so on until it
/// is unique. One warning is logged per renamed icon.
pub fn dedupe_names(mut items: Vec<IconRecord>) -> Vec<IconRecord> {
    rename_clashes(items.iter_mut().map(|item| &mut item.name), |name| {
        name.to_string()
    });
    items
}

/// Same renaming as [`dedupe_names`], but two names clash when `key` maps
/// them to the same value (e.g. the file they would be written to).
pub fn dedupe_by_key<F>(mut names: Vec<String>, key: F) -> Vec<String>
where
    F: Fn(&str) -> String,
{
    rename_clashes(names.iter_mut(), key);
    names
}

fn rename_clashes<'a, I, F>(names: I, key: F)
where
    I: IntoIterator<Item = &'a mut String>,
    F: Fn(&str) -> String,
{
    let mut taken = HashSet::new();
    for name in names {
        let mut current = key(name.as_str());
        if taken.contains(&current) {
            warn!(
                name = %name.as_str(),
                "Duplicate icon name: {}. Please fix figma file", current
            );
            while taken.contains(&current) {
                name.push_str(DUPLICATE_SUFFIX);
                current = key(name.as_str());
            }
        }
        taken.insert(current);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer};
    use tracing_subscriber::prelude::*;

    /// Warning messages recorded while running `f`.
    pub(crate) fn captured_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
        let warnings = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(WarnCapture {
            warnings: Arc::clone(&warnings),
        });
        let out = tracing::subscriber::with_default(subscriber, || {
            tracing::callsite::rebuild_interest_cache();
            f()
        });
        let warnings = warnings.lock().unwrap().clone();
        (out, warnings)
    }

    struct WarnCapture {
        warnings: Arc<Mutex<Vec<String>>>,
    }

    #[derive(Default)]
    struct MessageVisitor(Option<String>);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = Some(format!("{value:?}"));
            }
        }
    }

    impl<S: Subscriber> Layer<S> for WarnCapture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() != Level::WARN {
                return;
            }
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            if let Some(message) = visitor.0 {
                self.warnings.lock().unwrap().push(message);
            }
        }
    }

    fn icons(names: &[&str]) -> Vec<IconRecord> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| IconRecord::new(i.to_string(), *n))
            .collect()
    }

    fn names(items: &[IconRecord]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn unique_names_pass_through() {
        let (out, warnings) = captured_warnings(|| dedupe_names(icons(&["sun", "moon"])));
        assert_eq!(names(&out), vec!["sun", "moon"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn later_duplicate_gets_suffix() {
        let out = dedupe_names(icons(&["sun", "moon", "sun"]));
        assert_eq!(names(&out), vec!["sun", "moon", "sun-duplicate-name"]);
        assert_eq!(out[2].id, "2");
    }

    #[test]
    fn one_warning_per_renamed_icon() {
        let (out, warnings) =
            captured_warnings(|| dedupe_names(icons(&["sun", "sun", "moon", "sun"])));
        assert_eq!(
            names(&out),
            vec![
                "sun",
                "sun-duplicate-name",
                "moon",
                "sun-duplicate-name-duplicate-name"
            ]
        );
        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .all(|w| w == "Duplicate icon name: sun. Please fix figma file"));
    }

    #[test]
    fn suffixed_name_collision_is_suffixed_again() {
        let out = dedupe_names(icons(&["sun-duplicate-name", "sun", "sun"]));
        assert_eq!(
            names(&out),
            vec![
                "sun-duplicate-name",
                "sun",
                "sun-duplicate-name-duplicate-name"
            ]
        );
    }

    #[test]
    fn output_names_are_pairwise_distinct() {
        let out = dedupe_names(icons(&["a", "a", "a", "b", "a-duplicate-name", "b"]));
        assert_eq!(out.len(), 6);
        let unique: HashSet<&str> = names(&out).into_iter().collect();
        assert_eq!(unique.len(), out.len());
        assert_eq!(out[0].name, "a");
        assert_eq!(out[3].name, "b");
        let ids: Vec<&str> = out.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4", "5"]);
    }

    #[test]
    fn names_clash_by_key() {
        let key = |name: &str| name.replace('_', "-");
        let (out, warnings) = captured_warnings(|| {
            dedupe_by_key(vec!["arrow_left".into(), "arrow-left".into()], key)
        });
        assert_eq!(out, vec!["arrow_left", "arrow-left-duplicate-name"]);
        assert_eq!(
            warnings,
            vec!["Duplicate icon name: arrow-left. Please fix figma file"]
        );
    }
}
