// Synthetic build case

use crate::settings::LaunchSettings;
use crate::state::TestCase;

/// Build case described by the launch settings, present only when a build name was given.
/// Attachments are resolved by the caller.
pub fn build_case(settings: &LaunchSettings) -> Option<TestCase> {
    let name = settings.build_name.as_deref()?;

    let mut case = TestCase::build(name, settings.build_result.as_deref());
    case.desc = settings.build_desc.clone();
    case.reason = settings.build_reason.clone();
    Some(case)
}
