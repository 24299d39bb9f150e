use crate::report::RuleVerdict;
use crate::snapshot::InstanceSnapshot;
use crate::version::EngineVersion;

/// Every database should run at the engine's native compatibility level
/// (the default its generation assigns to new databases).
pub fn check_compat_level(snapshot: &InstanceSnapshot) -> RuleVerdict {
    let Some(server) = snapshot.server.as_ref() else {
        return RuleVerdict::review("server information not collected");
    };
    let Some(databases) = snapshot.databases.as_ref() else {
        return RuleVerdict::review("database options not collected");
    };

    let version = EngineVersion::from_major(server.major_version());
    let Some(native) = version.native_compat_level() else {
        return RuleVerdict::review(format!(
            "engine version {} has no known native compatibility level",
            server.product_version
        ));
    };
    if databases.is_empty() {
        return RuleVerdict::review("no database metadata collected");
    }

    let mut behind: Vec<String> = databases
        .iter()
        .filter(|db| db.compatibility_level < native)
        .map(|db| format!("{} ({})", db.name, db.compatibility_level))
        .collect();

    if behind.is_empty() {
        RuleVerdict::ok(format!("all databases at level {native}"))
    } else {
        behind.sort();
        RuleVerdict::review(format!("below native level {}: {}", native, behind.join(", ")))
    }
}
