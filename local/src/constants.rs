/// Crate wide constant values.

// *************
// *** files ***
// *************

/// Extension of project metadata files.
pub const PROJECT_FILE_EXTENSION: &str = "updproj";

/// Statistics script shipped alongside a project's updates.
pub const STATISTICS_FILE: &str = "statistics.php";

/// Directory holding the local projects, relative to the data directory.
pub const PROJECTS_DIR: &str = "Projects";

/// Registry of local projects, relative to the config directory.
pub const PROJECTS_REGISTRY_FILE: &str = "projects.json";

/// Local configuration, relative to the config directory.
pub const LOCAL_CONFIG_FILE: &str = "local_config.json";

/// Prefix of staging directories used during imports.
pub const STAGING_DIR_PREFIX: &str = ".updraft-import-";
