pub mod express;

use serde::Serialize;

/// Version written into every generated `package.json`.
pub const MANIFEST_VERSION: &str = "0.1.0";

/// Port the generated `server.js` listens on.
pub const SERVER_PORT: u16 = 3000;

/// Runtime dependencies installed into every generated project.
pub const DEPENDENCIES: &[&str] = &["express"];

/// Directories created under the project root, relative to it.
pub const DIRECTORIES: &[&str] = &[
    "src",
    "src/v1/configs",
    "src/v1/controllers",
    "src/v1/dbs",
    "src/v1/helpers",
    "src/v1/models",
    "src/v1/postman",
    "src/v1/routes",
    "src/v1/services",
    "src/v1/utils",
];

/// A static source file written verbatim into the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoilerplateFile {
    /// Path relative to the project root, `/`-separated.
    pub path: &'static str,
    pub content: &'static str,
}

/// Boilerplate files in write order. Every parent directory is listed in
/// [`DIRECTORIES`] or is the project root itself.
pub const BOILERPLATE_FILES: &[BoilerplateFile] = &[
    BoilerplateFile {
        path: "src/v1/routes/index.js",
        content: express::ROUTES_INDEX_JS,
    },
    BoilerplateFile {
        path: "src/app.js",
        content: express::APP_JS,
    },
    BoilerplateFile {
        path: "server.js",
        content: express::SERVER_JS,
    },
];

/// Contents of the generated `package.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedManifest {
    pub name: String,
    pub version: String,
    pub private: bool,
}

impl GeneratedManifest {
    pub fn new(app_name: &str) -> Self {
        GeneratedManifest {
            name: app_name.to_string(),
            version: MANIFEST_VERSION.to_string(),
            private: true,
        }
    }

    /// Pretty-printed JSON (2-space indent) followed by the platform line ending.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push_str(LINE_ENDING);
        Ok(json)
    }
}

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";
