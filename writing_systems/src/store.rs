// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directory of writing system files, one `<tag>.ldml` per definition.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use lang_primitives::{LanguageTag, Script};
use roxmltree::Node;

use crate::{CharacterSet, Collation, MatchedPair, StoreError, WritingSystemDefinition};

const EXTENSION: &str = "ldml";
const TMP_EXTENSION: &str = "ldml.tmp";
const BACKUP_EXTENSION: &str = "ldml.bak";
const FORMAT_VERSION: &str = "1";

/// Writes every definition to `dir` and removes files for tags that are no longer present.
///
/// All files are written under temporary names before any is moved into place. If a write or
/// a move fails, the files replaced so far are restored, the temporary files are removed and
/// stale files are left alone, so the directory is either fully updated or unchanged.
pub(crate) fn save_all<'a>(
    dir: &Path,
    definitions: impl IntoIterator<Item = &'a WritingSystemDefinition>,
) -> Result<usize, StoreError> {
    fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;
    let mut pending = Vec::new();
    let mut written = BTreeSet::new();
    for def in definitions {
        let tag = def.tag();
        let path = file_path(dir, &tag);
        let file = PendingFile {
            tmp: path.with_extension(TMP_EXTENSION),
            backup: path.with_extension(BACKUP_EXTENSION),
            path,
            replaced: false,
            committed: false,
        };
        if let Err(source) = fs::write(&file.tmp, to_xml(def)) {
            let err = io_error(&file.tmp, source);
            pending.push(file);
            discard(&pending);
            return Err(err);
        }
        pending.push(file);
        written.insert(tag);
    }

    let mut failure = None;
    for (ix, file) in pending.iter_mut().enumerate() {
        if let Err(err) = file.commit() {
            failure = Some((ix, err));
            break;
        }
    }
    if let Some((ix, err)) = failure {
        for file in pending[..=ix].iter().rev() {
            file.roll_back();
        }
        discard(&pending[ix..]);
        return Err(err);
    }
    for file in &pending {
        if file.replaced {
            remove_logged(&file.backup, "failed to remove writing system backup");
        }
    }

    for path in list_files(dir)? {
        let stale = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| !written.contains(stem));
        if stale {
            remove_logged(&path, "failed to remove stale writing system file");
        }
    }
    Ok(written.len())
}

/// A definition file written under a temporary name, waiting to be moved into place.
#[derive(Debug)]
struct PendingFile {
    path: PathBuf,
    tmp: PathBuf,
    backup: PathBuf,
    replaced: bool,
    committed: bool,
}

impl PendingFile {
    /// Moves the temporary file into place, keeping any previous file as a backup.
    fn commit(&mut self) -> Result<(), StoreError> {
        if self.path.is_file() {
            fs::rename(&self.path, &self.backup).map_err(|source| io_error(&self.path, source))?;
            self.replaced = true;
        }
        fs::rename(&self.tmp, &self.path).map_err(|source| io_error(&self.path, source))?;
        self.committed = true;
        Ok(())
    }

    /// Undoes [`commit`](Self::commit), restoring the previous file if there was one.
    fn roll_back(&self) {
        if self.replaced {
            if let Err(err) = fs::rename(&self.backup, &self.path) {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "failed to restore writing system file"
                );
            }
        } else if self.committed {
            remove_logged(&self.path, "failed to remove partially saved writing system file");
        }
    }
}

fn discard(files: &[PendingFile]) {
    for file in files {
        if file.tmp.exists() {
            remove_logged(&file.tmp, "failed to remove temporary writing system file");
        }
    }
}

fn remove_logged(path: &Path, message: &'static str) {
    if let Err(err) = fs::remove_file(path) {
        tracing::warn!(path = %path.display(), %err, "{message}");
    }
}

/// Returns the name of the first field of `def` holding a character XML cannot represent.
pub(crate) fn unstorable_field(def: &WritingSystemDefinition) -> Option<&'static str> {
    let collation = match &def.collation {
        Collation::Icu { name, rules } => vec![name.as_str(), rules.as_str()],
        Collation::System { tag } => vec![tag.as_str()],
        Collation::Simple { rules } => vec![rules.as_str()],
    };
    let optional = |value: &Option<String>| value.iter().any(|v| !is_storable(v));
    if !is_storable(&def.display_name) {
        Some("display name")
    } else if !is_storable(&def.abbreviation) {
        Some("abbreviation")
    } else if !is_storable(&def.default_font) {
        Some("default font")
    } else if !collation.iter().all(|v| is_storable(v)) {
        Some("collation")
    } else if optional(&def.spell_checking_id) {
        Some("spell checking id")
    } else if optional(&def.legacy_mapping) {
        Some("legacy mapping")
    } else if optional(&def.windows_lcid) {
        Some("windows lcid")
    } else if !def
        .character_sets
        .iter()
        .all(|set| is_storable(&set.name) && set.characters.iter().all(|c| is_storable(c)))
    {
        Some("character set")
    } else if !def
        .matched_pairs
        .iter()
        .all(|pair| is_storable(&pair.open) && is_storable(&pair.close))
    {
        Some("matched pair")
    } else {
        None
    }
}

/// XML 1.0 has no way to write these, not even as character references.
fn is_storable(value: &str) -> bool {
    !value.chars().any(|ch| {
        matches!(
            ch,
            '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}'
        )
    })
}

/// Reads every definition in `dir`, in file name order.
///
/// A directory that does not exist holds no definitions. Any unreadable or invalid file fails
/// the whole load.
pub(crate) fn load_all(dir: &Path) -> Result<Vec<WritingSystemDefinition>, StoreError> {
    if !dir.exists() {
        tracing::warn!(dir = %dir.display(), "writing system store does not exist");
        return Ok(Vec::new());
    }
    list_files(dir)?
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
            from_xml(path, &text)
        })
        .collect()
}

fn file_path(dir: &Path, tag: &str) -> PathBuf {
    dir.join(format!("{tag}.{EXTENSION}"))
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|source| io_error(dir, source))? {
        let path = entry.map_err(|source| io_error(dir, source))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_owned(),
        source,
    }
}

fn malformed(path: &Path, reason: impl Into<String>) -> StoreError {
    StoreError::Malformed {
        path: path.to_owned(),
        reason: reason.into(),
    }
}

pub(crate) fn to_xml(def: &WritingSystemDefinition) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<writingSystem version=\"");
    out.push_str(FORMAT_VERSION);
    out.push_str("\">\n");

    out.push_str("  <identity");
    attr(&mut out, "tag", &def.tag());
    attr(&mut out, "language", def.language());
    if let Some(script) = def.script() {
        attr(&mut out, "script", script.as_str());
    }
    if let Some(script) = def.implied_script() {
        attr(&mut out, "impliedScript", script.as_str());
    }
    if let Some(region) = def.region() {
        attr(&mut out, "region", region);
    }
    attr(&mut out, "variants", &def.variants().collect::<Vec<_>>().join(" "));
    attr(&mut out, "privateUse", &def.private_use().collect::<Vec<_>>().join(" "));
    out.push_str("/>\n");

    value_element(&mut out, "displayName", "value", &def.display_name);
    value_element(&mut out, "abbreviation", "value", &def.abbreviation);
    value_element(&mut out, "defaultFont", "name", &def.default_font);

    out.push_str("  <collation");
    match &def.collation {
        Collation::Icu { name, rules } => {
            attr(&mut out, "type", "icu");
            attr(&mut out, "name", name);
            attr(&mut out, "rules", rules);
        }
        Collation::System { tag } => {
            attr(&mut out, "type", "system");
            attr(&mut out, "tag", tag);
        }
        Collation::Simple { rules } => {
            attr(&mut out, "type", "simple");
            attr(&mut out, "rules", rules);
        }
    }
    out.push_str("/>\n");

    if let Some(id) = &def.spell_checking_id {
        value_element(&mut out, "spellChecking", "id", id);
    }
    if let Some(mapping) = &def.legacy_mapping {
        value_element(&mut out, "legacyMapping", "value", mapping);
    }
    if let Some(lcid) = &def.windows_lcid {
        value_element(&mut out, "windowsLcid", "value", lcid);
    }

    out.push_str("  <characterSets>\n");
    for set in &def.character_sets {
        out.push_str("    <characterSet");
        attr(&mut out, "type", &set.name);
        out.push_str(">\n");
        for ch in &set.characters {
            out.push_str("      <char");
            attr(&mut out, "value", ch);
            out.push_str("/>\n");
        }
        out.push_str("    </characterSet>\n");
    }
    out.push_str("  </characterSets>\n");

    out.push_str("  <matchedPairs>\n");
    for pair in &def.matched_pairs {
        out.push_str("    <matchedPair");
        attr(&mut out, "open", &pair.open);
        attr(&mut out, "close", &pair.close);
        attr(
            &mut out,
            "paragraphClosing",
            if pair.paragraph_closing { "true" } else { "false" },
        );
        out.push_str("/>\n");
    }
    out.push_str("  </matchedPairs>\n");
    out.push_str("</writingSystem>\n");
    out
}

fn value_element(out: &mut String, name: &str, key: &str, value: &str) {
    out.push_str("  <");
    out.push_str(name);
    attr(out, key, value);
    out.push_str("/>\n");
}

fn attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

pub(crate) fn from_xml(path: &Path, text: &str) -> Result<WritingSystemDefinition, StoreError> {
    let doc = roxmltree::Document::parse(text).map_err(|source| StoreError::Xml {
        path: path.to_owned(),
        source,
    })?;
    let root = doc.root_element();
    if root.tag_name().name() != "writingSystem" {
        return Err(malformed(path, "root element is not <writingSystem>"));
    }
    match root.attribute("version") {
        Some(FORMAT_VERSION) => {}
        Some(other) => return Err(malformed(path, format!("unsupported version `{other}`"))),
        None => return Err(malformed(path, "missing version")),
    }

    let identity = child(root, "identity").ok_or_else(|| malformed(path, "missing <identity>"))?;
    let mut def = read_identity(path, identity)?;

    let expected = identity
        .attribute("tag")
        .ok_or_else(|| malformed(path, "missing identity tag"))?;
    if def.tag() != expected {
        return Err(malformed(
            path,
            format!("tag `{expected}` does not match subtags `{}`", def.tag()),
        ));
    }
    let stem = path.file_stem().and_then(|stem| stem.to_str());
    if stem.is_some_and(|stem| stem != expected) {
        return Err(malformed(path, format!("file name does not match tag `{expected}`")));
    }

    let value = |name: &str, key: &str| {
        child(root, name)
            .and_then(|node| node.attribute(key))
            .map(str::to_owned)
    };
    def.display_name = value("displayName", "value").unwrap_or_default();
    def.abbreviation = value("abbreviation", "value").unwrap_or_default();
    def.default_font = value("defaultFont", "name").unwrap_or_default();
    def.spell_checking_id = value("spellChecking", "id");
    def.legacy_mapping = value("legacyMapping", "value");
    def.windows_lcid = value("windowsLcid", "value");

    if let Some(node) = child(root, "collation") {
        def.collation = read_collation(path, node)?;
    }

    if let Some(sets) = child(root, "characterSets") {
        for set in sets.children().filter(|n| n.has_tag_name("characterSet")) {
            let name = set
                .attribute("type")
                .ok_or_else(|| malformed(path, "character set without type"))?;
            let characters = set
                .children()
                .filter(|n| n.has_tag_name("char"))
                .map(|n| {
                    n.attribute("value")
                        .map(str::to_owned)
                        .ok_or_else(|| malformed(path, "character without value"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            def.character_sets.push(CharacterSet {
                name: name.to_owned(),
                characters,
            });
        }
    }

    if let Some(pairs) = child(root, "matchedPairs") {
        for pair in pairs.children().filter(|n| n.has_tag_name("matchedPair")) {
            let (Some(open), Some(close)) = (pair.attribute("open"), pair.attribute("close"))
            else {
                return Err(malformed(path, "matched pair without open or close"));
            };
            def.matched_pairs.push(MatchedPair {
                open: open.to_owned(),
                close: close.to_owned(),
                paragraph_closing: pair.attribute("paragraphClosing") == Some("true"),
            });
        }
    }

    Ok(def)
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn read_identity(path: &Path, node: Node<'_, '_>) -> Result<WritingSystemDefinition, StoreError> {
    let invalid = |what: &str, err: String| malformed(path, format!("invalid {what}: {err}"));
    let script = |key: &str| -> Result<Option<Script>, StoreError> {
        node.attribute(key)
            .map(|s| Script::parse(s).map_err(|err| invalid(key, err.to_string())))
            .transpose()
    };

    let language = node
        .attribute("language")
        .ok_or_else(|| malformed(path, "missing identity language"))?;
    let mut tag =
        LanguageTag::from_language(language).map_err(|err| invalid("language", err.to_string()))?;
    tag.set_script(script("script")?);
    tag.set_region(node.attribute("region"))
        .map_err(|err| invalid("region", err.to_string()))?;
    for variant in node.attribute("variants").unwrap_or("").split_whitespace() {
        tag.push_variant(variant)
            .map_err(|err| invalid("variant", err.to_string()))?;
    }
    for subtag in node.attribute("privateUse").unwrap_or("").split_whitespace() {
        tag.push_private_use(subtag)
            .map_err(|err| invalid("private-use subtag", err.to_string()))?;
    }
    Ok(WritingSystemDefinition::new(tag, script("impliedScript")?))
}

fn read_collation(path: &Path, node: Node<'_, '_>) -> Result<Collation, StoreError> {
    let get = |key: &str| node.attribute(key).unwrap_or("").to_owned();
    match node.attribute("type") {
        Some("icu") => Ok(Collation::Icu {
            name: get("name"),
            rules: get("rules"),
        }),
        Some("system") => Ok(Collation::System { tag: get("tag") }),
        Some("simple") => Ok(Collation::Simple {
            rules: get("rules"),
        }),
        Some(other) => Err(malformed(path, format!("unknown collation type `{other}`"))),
        None => Err(malformed(path, "collation without type")),
    }
}
