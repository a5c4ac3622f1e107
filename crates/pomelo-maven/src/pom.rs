//! POM file parsing: dependency declarations, parent references, licenses,
//! dependency management, and coordinate normalization.

use std::collections::BTreeMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use pomelo_core::coordinate::Coordinate;
use pomelo_util::errors::PomeloError;

/// A parsed POM (Project Object Model) file.
#[derive(Debug, Clone, Default)]
pub struct Pom {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,

    pub parent: Option<ParentRef>,
    pub properties: BTreeMap<String, String>,
    pub dependencies: Vec<PomDependency>,
    pub dependency_management: Vec<PomDependency>,
    pub licenses: Vec<PomLicense>,
}

/// Reference to a parent POM.
#[derive(Debug, Clone)]
pub struct ParentRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub relative_path: Option<String>,
}

/// A dependency declared in a POM file.
#[derive(Debug, Clone)]
pub struct PomDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
}

impl PomDependency {
    fn empty() -> Self {
        Self {
            group_id: String::new(),
            artifact_id: String::new(),
            version: None,
            scope: None,
        }
    }
}

/// A license declared in a POM file.
#[derive(Debug, Clone)]
pub struct PomLicense {
    pub name: Option<String>,
    pub url: Option<String>,
}

impl Pom {
    /// Effective group ID (falls back to parent).
    pub fn effective_group_id(&self) -> Option<&str> {
        self.group_id
            .as_deref()
            .or(self.parent.as_ref().map(|p| p.group_id.as_str()))
    }

    /// Effective version (falls back to parent).
    pub fn effective_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or(self.parent.as_ref().map(|p| p.version.as_str()))
    }

    /// This POM's own coordinate, if all three parts are non-empty.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let coord = Coordinate::new(
            self.group_id.as_deref().unwrap_or(""),
            self.artifact_id.as_deref().unwrap_or(""),
            self.version.as_deref().unwrap_or(""),
        );
        coord.is_complete().then_some(coord)
    }

    /// The coordinate of the declared `<parent>`, if complete.
    pub fn parent_coordinate(&self) -> Option<Coordinate> {
        let p = self.parent.as_ref()?;
        let coord = Coordinate::new(&p.group_id, &p.artifact_id, &p.version);
        coord.is_complete().then_some(coord)
    }

    /// Fill inherited coordinate parts and built-in properties.
    ///
    /// Missing `groupId`/`version` fall back to the parent reference, and
    /// `project.version` is inserted into the properties map. Returns the
    /// now-complete coordinate, or `IncompleteCoordinate` if any part is
    /// still empty.
    pub fn normalize(&mut self) -> miette::Result<Coordinate> {
        if self.group_id.as_deref().is_none_or(str::is_empty) {
            self.group_id = self.parent.as_ref().map(|p| p.group_id.clone());
        }
        if self.version.as_deref().is_none_or(str::is_empty) {
            self.version = self.parent.as_ref().map(|p| p.version.clone());
        }
        if let Some(version) = self.version.clone() {
            self.properties
                .entry("project.version".to_string())
                .or_insert(version);
        }
        self.coordinate().ok_or_else(|| {
            PomeloError::IncompleteCoordinate {
                message: format!(
                    "groupId '{}', artifactId '{}', version '{}'",
                    self.group_id.as_deref().unwrap_or(""),
                    self.artifact_id.as_deref().unwrap_or(""),
                    self.version.as_deref().unwrap_or(""),
                ),
            }
            .into()
        })
    }

    /// Look up a version from this POM's dependency management for a given
    /// group:artifact. Parent chains are searched by the resolver.
    pub fn managed_version(&self, group_id: &str, artifact_id: &str) -> Option<&str> {
        self.dependency_management
            .iter()
            .find(|d| d.group_id == group_id && d.artifact_id == artifact_id)
            .and_then(|d| d.version.as_deref())
    }
}

/// Parse a POM XML string into a `Pom` struct.
///
/// Only the elements needed for resolution are interpreted; anything else
/// is skipped.
pub fn parse_pom(xml: &str) -> miette::Result<Pom> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pom = Pom::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    // Temporary accumulators for nested elements
    let mut current_dep: Option<PomDependency> = None;
    let mut current_parent: Option<ParentRef> = None;
    let mut current_license: Option<PomLicense> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                path.push(tag);
                text_buf.clear();

                match path_context(&path).as_str() {
                    "project>dependencies>dependency"
                    | "project>dependencyManagement>dependencies>dependency" => {
                        current_dep = Some(PomDependency::empty());
                    }
                    "project>parent" => {
                        current_parent = Some(ParentRef {
                            group_id: String::new(),
                            artifact_id: String::new(),
                            version: String::new(),
                            relative_path: None,
                        });
                    }
                    "project>licenses>license" => {
                        current_license = Some(PomLicense {
                            name: None,
                            url: None,
                        });
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                let ctx = path_context(&path);
                let depth = path.len();

                // Properties: <project><properties><key>value</key></properties>
                if depth == 3 && path.get(1).map(|s| s.as_str()) == Some("properties") {
                    let prop_name = path.last().cloned().unwrap_or_default();
                    pom.properties.insert(prop_name, text_buf.clone());
                }

                // Dependency fields, in either <dependencies> or
                // <dependencyManagement>
                if let Some(ref mut dep) = current_dep {
                    match path.last().map(|s| s.as_str()) {
                        Some("groupId") if ctx.ends_with(">dependency>groupId") => {
                            dep.group_id = text_buf.clone();
                        }
                        Some("artifactId") if ctx.ends_with(">dependency>artifactId") => {
                            dep.artifact_id = text_buf.clone();
                        }
                        Some("version") if ctx.ends_with(">dependency>version") => {
                            dep.version = Some(text_buf.clone());
                        }
                        Some("scope") if ctx.ends_with(">dependency>scope") => {
                            dep.scope = Some(text_buf.clone());
                        }
                        _ => {}
                    }

                    if ctx == "project>dependencies>dependency" {
                        if let Some(dep) = current_dep.take() {
                            pom.dependencies.push(dep);
                        }
                    } else if ctx == "project>dependencyManagement>dependencies>dependency" {
                        if let Some(dep) = current_dep.take() {
                            pom.dependency_management.push(dep);
                        }
                    }
                }

                // Parent fields
                if let Some(ref mut parent) = current_parent {
                    match path.last().map(|s| s.as_str()) {
                        Some("groupId") if ctx == "project>parent>groupId" => {
                            parent.group_id = text_buf.clone();
                        }
                        Some("artifactId") if ctx == "project>parent>artifactId" => {
                            parent.artifact_id = text_buf.clone();
                        }
                        Some("version") if ctx == "project>parent>version" => {
                            parent.version = text_buf.clone();
                        }
                        Some("relativePath") if ctx == "project>parent>relativePath" => {
                            parent.relative_path = Some(text_buf.clone());
                        }
                        _ => {}
                    }
                    if ctx == "project>parent" {
                        pom.parent = current_parent.take();
                    }
                }

                // License fields
                if let Some(ref mut license) = current_license {
                    match path.last().map(|s| s.as_str()) {
                        Some("name") if ctx == "project>licenses>license>name" => {
                            license.name = Some(text_buf.clone());
                        }
                        Some("url") if ctx == "project>licenses>license>url" => {
                            license.url = Some(text_buf.clone());
                        }
                        _ => {}
                    }
                    if ctx == "project>licenses>license" {
                        if let Some(lic) = current_license.take() {
                            pom.licenses.push(lic);
                        }
                    }
                }

                // Top-level project fields
                if depth == 2 {
                    match path.last().map(|s| s.as_str()) {
                        Some("groupId") => pom.group_id = Some(text_buf.clone()),
                        Some("artifactId") => pom.artifact_id = Some(text_buf.clone()),
                        Some("version") => pom.version = Some(text_buf.clone()),
                        Some("packaging") => pom.packaging = Some(text_buf.clone()),
                        Some("name") => pom.name = Some(text_buf.clone()),
                        Some("description") => pom.description = Some(text_buf.clone()),
                        Some("url") => pom.url = Some(text_buf.clone()),
                        _ => {}
                    }
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(PomeloError::MalformedXml {
                    message: format!("{e}"),
                }
                .into());
            }
            _ => {}
        }
    }

    Ok(pom)
}

/// Build a context string from the current XML path for matching.
fn path_context(path: &[String]) -> String {
    path.join(">")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>org.example</groupId>
    <artifactId>my-lib</artifactId>
    <version>1.0.0</version>
    <packaging>jar</packaging>

    <properties>
        <guava.version>32.0.0-jre</guava.version>
    </properties>

    <dependencies>
        <dependency>
            <groupId>com.google.guava</groupId>
            <artifactId>guava</artifactId>
            <version>${guava.version}</version>
        </dependency>
        <dependency>
            <groupId>junit</groupId>
            <artifactId>junit</artifactId>
            <version>4.13.2</version>
            <scope>test</scope>
        </dependency>
    </dependencies>
</project>"#;

    #[test]
    fn parse_simple_pom() {
        let pom = parse_pom(SIMPLE_POM).unwrap();
        assert_eq!(pom.group_id.as_deref(), Some("org.example"));
        assert_eq!(pom.artifact_id.as_deref(), Some("my-lib"));
        assert_eq!(pom.version.as_deref(), Some("1.0.0"));
        assert_eq!(pom.packaging.as_deref(), Some("jar"));
        assert_eq!(pom.dependencies.len(), 2);
        assert_eq!(pom.properties.get("guava.version").unwrap(), "32.0.0-jre");
    }

    #[test]
    fn scope_parsing() {
        let pom = parse_pom(SIMPLE_POM).unwrap();
        assert_eq!(pom.dependencies[0].scope, None);
        assert_eq!(pom.dependencies[1].scope.as_deref(), Some("test"));
    }

    #[test]
    fn dependency_order_is_preserved() {
        let pom = parse_pom(SIMPLE_POM).unwrap();
        assert_eq!(pom.dependencies[0].artifact_id, "guava");
        assert_eq!(pom.dependencies[1].artifact_id, "junit");
    }

    #[test]
    fn dependency_management_lookup() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <groupId>org.example</groupId>
    <artifactId>parent</artifactId>
    <version>1.0.0</version>

    <dependencyManagement>
        <dependencies>
            <dependency>
                <groupId>com.google.guava</groupId>
                <artifactId>guava</artifactId>
                <version>32.0.0-jre</version>
            </dependency>
        </dependencies>
    </dependencyManagement>
</project>"#;
        let pom = parse_pom(xml).unwrap();
        assert!(pom.dependencies.is_empty());
        assert_eq!(pom.dependency_management.len(), 1);
        assert_eq!(
            pom.managed_version("com.google.guava", "guava"),
            Some("32.0.0-jre")
        );
        assert_eq!(pom.managed_version("com.google.guava", "failureaccess"), None);
    }

    #[test]
    fn parent_ref_parsing() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <parent>
        <groupId>org.example</groupId>
        <artifactId>parent-pom</artifactId>
        <version>2.0.0</version>
    </parent>
    <artifactId>child</artifactId>
</project>"#;
        let pom = parse_pom(xml).unwrap();
        assert!(pom.parent.is_some());
        assert_eq!(pom.effective_group_id(), Some("org.example"));
        assert_eq!(pom.effective_version(), Some("2.0.0"));
        let coord = pom.parent_coordinate().unwrap();
        assert_eq!(coord.to_string(), "org.example:parent-pom:2.0.0");
    }

    #[test]
    fn normalize_inherits_from_parent() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <parent>
        <groupId>org.example</groupId>
        <artifactId>parent-pom</artifactId>
        <version>2.0.0</version>
    </parent>
    <artifactId>child</artifactId>
</project>"#;
        let mut pom = parse_pom(xml).unwrap();
        let coord = pom.normalize().unwrap();
        assert_eq!(coord.to_string(), "org.example:child:2.0.0");
        assert_eq!(pom.group_id.as_deref(), Some("org.example"));
        assert_eq!(pom.version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn normalize_inserts_project_version_property() {
        let mut pom = parse_pom(SIMPLE_POM).unwrap();
        pom.normalize().unwrap();
        assert_eq!(
            pom.properties.get("project.version").map(String::as_str),
            Some("1.0.0")
        );
    }

    #[test]
    fn normalize_keeps_declared_project_version_property() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <groupId>org.example</groupId>
    <artifactId>lib</artifactId>
    <version>3.0.0</version>
    <properties>
        <project.version>overridden</project.version>
    </properties>
</project>"#;
        let mut pom = parse_pom(xml).unwrap();
        pom.normalize().unwrap();
        assert_eq!(
            pom.properties.get("project.version").map(String::as_str),
            Some("overridden")
        );
    }

    #[test]
    fn normalize_fails_without_coordinate() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <artifactId>orphan</artifactId>
</project>"#;
        let mut pom = parse_pom(xml).unwrap();
        let err = pom.normalize().unwrap_err();
        assert!(err.to_string().contains("Incomplete coordinate"));
    }

    #[test]
    fn mismatched_tags_are_malformed() {
        let xml = "<project><groupId>org.example</artifactId></project>";
        let err = parse_pom(xml).unwrap_err();
        assert!(err.to_string().contains("Malformed XML"));
    }

    #[test]
    fn license_parsing() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <groupId>org.example</groupId>
    <artifactId>app</artifactId>
    <version>1.0</version>
    <licenses>
        <license>
            <name>Apache-2.0</name>
            <url>https://www.apache.org/licenses/LICENSE-2.0</url>
        </license>
        <license>
            <name>MIT</name>
        </license>
    </licenses>
</project>"#;
        let pom = parse_pom(xml).unwrap();
        assert_eq!(pom.licenses.len(), 2);
        assert_eq!(pom.licenses[0].name.as_deref(), Some("Apache-2.0"));
        assert!(pom.licenses[0].url.is_some());
        assert_eq!(pom.licenses[1].name.as_deref(), Some("MIT"));
        assert!(pom.licenses[1].url.is_none());
    }

    #[test]
    fn informational_fields() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <groupId>org.example</groupId>
    <artifactId>app</artifactId>
    <version>1.0</version>
    <name>Example App</name>
    <description>Does example things.</description>
    <url>https://example.org</url>
</project>"#;
        let pom = parse_pom(xml).unwrap();
        assert_eq!(pom.name.as_deref(), Some("Example App"));
        assert_eq!(pom.description.as_deref(), Some("Does example things."));
        assert_eq!(pom.url.as_deref(), Some("https://example.org"));
    }

    #[test]
    fn unknown_elements_are_ignored() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <groupId>org.example</groupId>
    <artifactId>app</artifactId>
    <version>1.0</version>
    <build>
        <plugins>
            <plugin>
                <groupId>org.apache.maven.plugins</groupId>
                <artifactId>maven-compiler-plugin</artifactId>
            </plugin>
        </plugins>
    </build>
</project>"#;
        let pom = parse_pom(xml).unwrap();
        assert!(pom.dependencies.is_empty());
        assert_eq!(pom.artifact_id.as_deref(), Some("app"));
    }
}
