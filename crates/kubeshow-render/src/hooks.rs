//! Hook selection for the combined manifest

use kubeshow_core::Hook;

/// Keep the hooks that belong in the combined manifest
///
/// A hook is dropped iff `skip_tests` is set and one of its events is a test
/// event. Surviving hooks keep their order.
pub fn filter_hooks<'a, I>(hooks: I, skip_tests: bool) -> Vec<&'a Hook>
where
    I: IntoIterator<Item = &'a Hook>,
{
    hooks
        .into_iter()
        .filter(|hook| {
            let keep = !(skip_tests && hook.is_test());
            if !keep {
                tracing::debug!(name = %hook.name, path = %hook.path, "skipping test hook");
            }
            keep
        })
        .collect()
}
