// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use hashbrown::HashMap;
use lang_primitives::{LanguageTag, ParseLanguageTagError, Script, WsHandle};

use crate::{
    store, BuiltinMetadata, Collation, ExtensionPolicy, HandleTable, LanguageMetadata,
    PrefixLookup, PrivateUseTags, RegistryConfig, RegistryError, WritingSystemDefinition,
};

type SharedMetadata = Arc<dyn LanguageMetadata + Send + Sync>;

/// Where a tag is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryState {
    /// The tag has no handle.
    Unregistered,
    /// The tag has a handle and changes that have not been saved.
    Registered(WsHandle),
    /// The tag has a handle and its definition matches the store.
    Persisted(WsHandle),
}

#[derive(Clone, Debug)]
struct Entry {
    definition: Arc<WritingSystemDefinition>,
    persisted: bool,
}

#[derive(Clone, Debug, Default)]
struct State {
    table: HandleTable,
    entries: HashMap<WsHandle, Entry>,
}

impl State {
    fn definition(&self, handle: WsHandle) -> Option<Arc<WritingSystemDefinition>> {
        self.entries.get(&handle).map(|e| e.definition.clone())
    }

    fn insert(
        &mut self,
        definition: WritingSystemDefinition,
        persisted: bool,
    ) -> Result<(WsHandle, Arc<WritingSystemDefinition>), RegistryError> {
        let tag = definition.tag();
        let (handle, _) = self.table.get_or_insert(&tag)?;
        let definition = Arc::new(definition);
        self.entries.insert(
            handle,
            Entry {
                definition: definition.clone(),
                persisted,
            },
        );
        tracing::debug!(%tag, %handle, "registered writing system");
        Ok((handle, definition))
    }
}

/// The set of writing systems known to one session, with their handles.
///
/// All methods take `&self`. Reads are served from the current state; writes copy it, so a
/// [`RegistrySnapshot`] taken earlier is never affected by later changes.
pub struct Registry {
    config: RegistryConfig,
    metadata: SharedMetadata,
    state: RwLock<Arc<State>>,
}

impl Registry {
    /// Creates an empty registry using the built-in language metadata.
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_metadata(config, BuiltinMetadata)
    }

    /// Creates an empty registry using `metadata` to populate new definitions.
    pub fn with_metadata(
        config: RegistryConfig,
        metadata: impl LanguageMetadata + Send + Sync + 'static,
    ) -> Self {
        Self {
            config,
            metadata: Arc::new(metadata),
            state: RwLock::default(),
        }
    }

    /// Creates a registry and loads every definition from the configured store.
    pub fn open(config: RegistryConfig) -> Result<Self, RegistryError> {
        let registry = Self::new(config);
        registry.reload()?;
        Ok(registry)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Returns the language metadata.
    pub fn metadata(&self) -> &dyn LanguageMetadata {
        &*self.metadata
    }

    fn current(&self) -> Arc<State> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<State>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a definition for `tag` populated from metadata, without registering it.
    ///
    /// The display name is the language name (or the language code when unknown) and the
    /// abbreviation is its first three characters.
    pub fn create(&self, tag: &str) -> Result<WritingSystemDefinition, RegistryError> {
        let subtags = LanguageTag::parse(tag).map_err(|source| invalid_tag(tag, source))?;
        Ok(self.populate(subtags))
    }

    /// Like [`create`](Self::create), from individual subtags.
    ///
    /// Entries of `variants` starting with `x-` are private-use subtags.
    pub fn create_from_subtags(
        &self,
        language: &str,
        script: Option<&str>,
        region: Option<&str>,
        variants: &[&str],
    ) -> Result<WritingSystemDefinition, RegistryError> {
        let described = || {
            let mut parts = vec![language];
            parts.extend(script);
            parts.extend(region);
            parts.extend(variants.iter().copied());
            parts.join("-")
        };
        let build = || -> Result<LanguageTag, ParseLanguageTagError> {
            let mut tag = LanguageTag::from_language(language)?;
            if let Some(script) = script {
                tag.set_script(Some(
                    Script::parse(script).map_err(|_| ParseLanguageTagError::InvalidScript)?,
                ));
            }
            tag.set_region(region)?;
            for variant in variants {
                match variant.strip_prefix("x-") {
                    Some(private) => tag.push_private_use(private)?,
                    None => tag.push_variant(variant)?,
                };
            }
            Ok(tag)
        };
        let subtags = build().map_err(|source| invalid_tag(&described(), source))?;
        Ok(self.populate(subtags))
    }

    fn populate(&self, subtags: LanguageTag) -> WritingSystemDefinition {
        let implied = self
            .metadata
            .default_script(subtags.language(), subtags.region());
        let info = self.metadata.language(subtags.language());
        let mut def = WritingSystemDefinition::new(subtags, implied);
        def.display_name = info
            .as_ref()
            .map_or_else(|| def.language().to_owned(), |info| info.name.clone());
        def.abbreviation = def.display_name.chars().take(3).collect();
        def.default_font = self.config.default_font.clone();
        def.collation = if info.is_some_and(|info| info.system_collation) {
            Collation::System { tag: def.tag() }
        } else {
            Collation::standard()
        };
        def
    }

    fn canonical_tag(&self, tag: &str) -> Option<String> {
        canonical_tag(&*self.metadata, tag)
    }

    /// Registers `definition`, returning its new handle.
    ///
    /// Fails if the tag is taken or a text field holds a control character other than tab, line
    /// feed or carriage return.
    pub fn set(&self, definition: WritingSystemDefinition) -> Result<WsHandle, RegistryError> {
        check_storable(&definition)?;
        let tag = definition.tag();
        let mut guard = self.write();
        if guard.table.get(&tag).is_some() {
            return Err(RegistryError::DuplicateTag(tag));
        }
        let (handle, _) = Arc::make_mut(&mut *guard).insert(definition, false)?;
        Ok(handle)
    }

    /// Returns the writing system for `tag`, creating and registering it if needed.
    ///
    /// The flag is `true` if the writing system already existed. A request whose canonical
    /// form matches an existing entry (`en-Latn` when `en` exists) returns that entry. Under
    /// [`ExtensionPolicy::ExtendExisting`] a request that adds variant or private-use
    /// subtags to exactly one existing entry renames that entry instead of creating a new one.
    pub fn get_or_create_definition(
        &self,
        tag: &str,
    ) -> Result<(WsHandle, Arc<WritingSystemDefinition>, bool), RegistryError> {
        let candidate = self.create(tag)?;
        let canonical = candidate.tag();

        let current = self.current();
        if let Some(handle) = current.table.get(&canonical) {
            if let Some(def) = current.definition(handle) {
                return Ok((handle, def, true));
            }
        }
        drop(current);

        let mut guard = self.write();
        if let Some(handle) = guard.table.get(&canonical) {
            if let Some(def) = guard.definition(handle) {
                return Ok((handle, def, true));
            }
        }

        if self.config.extension_policy == ExtensionPolicy::ExtendExisting {
            let requested = candidate.language_tag();
            let mut bases = guard
                .entries
                .iter()
                .filter(|(_, e)| requested.is_strict_extension_of(&e.definition.language_tag()));
            if let (Some((&handle, entry)), None) = (bases.next(), bases.next()) {
                let old = entry.definition.tag();
                let mut extended = (*entry.definition).clone();
                extend_subtags(&mut extended, &candidate)
                    .map_err(|source| invalid_tag(tag, source))?;
                let state = Arc::make_mut(&mut *guard);
                let def = state.replace(handle, extended)?;
                tracing::debug!(%handle, from = %old, to = %canonical, "extended writing system");
                return Ok((handle, def, true));
            }
        }

        let (handle, def) = Arc::make_mut(&mut *guard).insert(candidate, false)?;
        Ok((handle, def, false))
    }

    /// Returns the handle for `tag`, creating and registering a writing system if needed.
    pub fn get_or_create_handle(&self, tag: &str) -> Result<WsHandle, RegistryError> {
        self.get_or_create_definition(tag)
            .map(|(handle, _, _)| handle)
    }

    /// Returns the tag bound to `handle`.
    pub fn handle_to_tag(&self, handle: WsHandle) -> Option<String> {
        self.current().table.tag(handle).map(str::to_owned)
    }

    /// Returns the handle bound to the canonical form of `tag`.
    pub fn tag_to_handle(&self, tag: &str) -> Option<WsHandle> {
        let canonical = self.canonical_tag(tag)?;
        self.current().table.get(&canonical)
    }

    /// Returns `true` if the canonical form of `tag` is registered.
    pub fn exists_tag(&self, tag: &str) -> bool {
        self.tag_to_handle(tag).is_some()
    }

    /// Returns `true` if `handle` is bound.
    pub fn exists_handle(&self, handle: WsHandle) -> bool {
        self.current().entries.contains_key(&handle)
    }

    /// Returns the definition bound to `handle`.
    pub fn definition(&self, handle: WsHandle) -> Option<Arc<WritingSystemDefinition>> {
        self.current().definition(handle)
    }

    /// Returns the definition registered for the canonical form of `tag`.
    pub fn definition_by_tag(&self, tag: &str) -> Option<Arc<WritingSystemDefinition>> {
        self.tag_to_handle(tag)
            .and_then(|handle| self.definition(handle))
    }

    /// Returns the lifecycle state of `tag`.
    pub fn state(&self, tag: &str) -> EntryState {
        let Some(canonical) = self.canonical_tag(tag) else {
            return EntryState::Unregistered;
        };
        let current = self.current();
        match current
            .table
            .get(&canonical)
            .and_then(|handle| Some((handle, current.entries.get(&handle)?)))
        {
            Some((handle, entry)) if entry.persisted => EntryState::Persisted(handle),
            Some((handle, _)) => EntryState::Registered(handle),
            None => EntryState::Unregistered,
        }
    }

    /// Returns the number of registered writing systems.
    pub fn len(&self) -> usize {
        self.current().entries.len()
    }

    /// Returns `true` if no writing system is registered.
    pub fn is_empty(&self) -> bool {
        self.current().entries.is_empty()
    }

    /// Returns every handle in allocation order.
    pub fn handles(&self) -> Vec<WsHandle> {
        self.current().table.iter().map(|(handle, _)| handle).collect()
    }

    /// Applies `f` to the definition bound to `handle`.
    ///
    /// If `f` changes the tag, the handle is rebound to the new tag. Fails without changing
    /// anything if the new tag belongs to another writing system or a text field ends up
    /// holding a character [`set`](Self::set) rejects.
    pub fn update(
        &self,
        handle: WsHandle,
        f: impl FnOnce(&mut WritingSystemDefinition),
    ) -> Result<Arc<WritingSystemDefinition>, RegistryError> {
        let mut guard = self.write();
        let current = guard
            .definition(handle)
            .ok_or(RegistryError::UnknownHandle(handle))?;
        let mut def = (*current).clone();
        let old = def.tag();
        f(&mut def);
        check_storable(&def)?;
        let new = def.tag();
        let def = Arc::make_mut(&mut *guard).replace(handle, def)?;
        if old != new {
            tracing::debug!(%handle, from = %old, to = %new, "re-keyed writing system");
        }
        Ok(def)
    }

    /// Resolves a full or abbreviated tag.
    ///
    /// An exact match wins. Otherwise the unique registered tag that extends `key` by whole
    /// subtags and passes the configured [`PrefixPreference`](crate::PrefixPreference) is
    /// returned.
    pub fn find_by_prefix(&self, key: &str) -> Option<WsHandle> {
        let key = self
            .canonical_tag(key)
            .unwrap_or_else(|| key.trim().to_owned());
        let current = self.current();
        let lookup =
            PrefixLookup::new(PrivateUseTags, self.config.prefix_preference).with_separator('-');
        let found = lookup.resolve(&key, current.table.iter().map(|(_, tag)| tag))?;
        current.table.get(found)
    }

    /// Writes every registered definition to the store, returning how many were written.
    ///
    /// Files for tags that are no longer registered are removed. Does nothing when no store
    /// directory is configured.
    pub fn save(&self) -> Result<usize, RegistryError> {
        let Some(dir) = &self.config.store_dir else {
            return Ok(0);
        };
        let mut guard = self.write();
        let count = store::save_all(
            dir,
            guard.entries.values().map(|entry| entry.definition.as_ref()),
        )?;
        for entry in Arc::make_mut(&mut *guard).entries.values_mut() {
            entry.persisted = true;
        }
        tracing::info!(dir = %dir.display(), count, "saved writing systems");
        Ok(count)
    }

    /// Replaces the registered definitions with those in the store, returning how many were
    /// loaded.
    ///
    /// Tags that were already registered keep their handles. New tags get fresh handles in
    /// sorted tag order and tags missing from the store are dropped. A failed load leaves
    /// the registry unchanged. Does nothing when no store directory is configured.
    pub fn reload(&self) -> Result<usize, RegistryError> {
        let Some(dir) = &self.config.store_dir else {
            return Ok(0);
        };
        let mut loaded = store::load_all(dir)?;
        loaded.sort_by_cached_key(WritingSystemDefinition::tag);

        let mut guard = self.write();
        let mut next = State {
            table: guard.table.clone(),
            entries: HashMap::new(),
        };
        for def in loaded {
            next.insert(def, true)?;
        }
        let stale: Vec<_> = next
            .table
            .iter()
            .map(|(handle, _)| handle)
            .filter(|handle| !next.entries.contains_key(handle))
            .collect();
        for handle in stale {
            next.table.remove(handle);
        }
        let count = next.entries.len();
        *guard = Arc::new(next);
        tracing::info!(dir = %dir.display(), count, "loaded writing systems");
        Ok(count)
    }

    /// Returns a read-only view of the current state that does not hold any lock.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            state: self.current(),
            metadata: self.metadata.clone(),
        }
    }
}

impl State {
    fn replace(
        &mut self,
        handle: WsHandle,
        definition: WritingSystemDefinition,
    ) -> Result<Arc<WritingSystemDefinition>, RegistryError> {
        if !self.entries.contains_key(&handle) {
            return Err(RegistryError::UnknownHandle(handle));
        }
        self.table.rename(handle, &definition.tag())?;
        let definition = Arc::new(definition);
        self.entries.insert(
            handle,
            Entry {
                definition: definition.clone(),
                persisted: false,
            },
        );
        Ok(definition)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// An immutable view of a [`Registry`] at one point in time.
#[derive(Clone)]
pub struct RegistrySnapshot {
    state: Arc<State>,
    metadata: SharedMetadata,
}

impl RegistrySnapshot {
    /// Returns the tag bound to `handle`.
    pub fn handle_to_tag(&self, handle: WsHandle) -> Option<&str> {
        self.state.table.tag(handle)
    }

    /// Returns the handle bound to the canonical form of `tag`.
    pub fn tag_to_handle(&self, tag: &str) -> Option<WsHandle> {
        let canonical = canonical_tag(&*self.metadata, tag)?;
        self.state.table.get(&canonical)
    }

    /// Returns the definition bound to `handle`.
    pub fn definition(&self, handle: WsHandle) -> Option<&WritingSystemDefinition> {
        self.state.entries.get(&handle).map(|e| &*e.definition)
    }

    /// Returns the number of writing systems.
    pub fn len(&self) -> usize {
        self.state.entries.len()
    }

    /// Returns `true` if there are no writing systems.
    pub fn is_empty(&self) -> bool {
        self.state.entries.is_empty()
    }

    /// Returns every handle in allocation order.
    pub fn handles(&self) -> Vec<WsHandle> {
        self.state.table.iter().map(|(handle, _)| handle).collect()
    }
}

impl fmt::Debug for RegistrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrySnapshot")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

fn invalid_tag(tag: &str, source: ParseLanguageTagError) -> RegistryError {
    RegistryError::InvalidTag {
        tag: tag.to_owned(),
        source,
    }
}

fn check_storable(def: &WritingSystemDefinition) -> Result<(), RegistryError> {
    match store::unstorable_field(def) {
        Some(field) => Err(RegistryError::UnstorableText {
            tag: def.tag(),
            field,
        }),
        None => Ok(()),
    }
}

fn canonical_tag(metadata: &dyn LanguageMetadata, tag: &str) -> Option<String> {
    let subtags = LanguageTag::parse(tag).ok()?;
    let implied = metadata.default_script(subtags.language(), subtags.region());
    Some(WritingSystemDefinition::new(subtags, implied).tag())
}

/// Appends the variant and private-use subtags `target` has beyond `def`.
fn extend_subtags(
    def: &mut WritingSystemDefinition,
    target: &WritingSystemDefinition,
) -> Result<(), ParseLanguageTagError> {
    let have = def.variants().len();
    for variant in target.variants().skip(have) {
        def.add_variant(variant)?;
    }
    let have = def.private_use().len();
    for subtag in target.private_use().skip(have) {
        def.add_private_use(subtag)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{extend_subtags, EntryState, Registry};
    use crate::{
        Collation, ExtensionPolicy, PrefixPreference, RegistryConfig, RegistryError, Script,
        AUDIO_PRIVATE_USE, DEFAULT_FONT, UNLISTED_LANGUAGE,
    };

    fn registry() -> Registry {
        Registry::new(RegistryConfig::in_memory())
    }

    #[test]
    fn handles_are_idempotent_and_distinct() {
        let registry = registry();
        let en = registry.get_or_create_handle("en-US").unwrap();
        assert_eq!(registry.get_or_create_handle("en-US").unwrap(), en);
        assert_eq!(registry.get_or_create_handle(" EN_us ").unwrap(), en);
        let fr = registry.get_or_create_handle("fr").unwrap();
        assert_ne!(en, fr);
        assert_eq!(registry.handles(), [en, fr]);
        assert_eq!(registry.handle_to_tag(fr).as_deref(), Some("fr"));
        assert_eq!(registry.tag_to_handle("de"), None);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn implied_script_resolves_to_existing() {
        let registry = registry();
        let (en, _, existed) = registry.get_or_create_definition("en").unwrap();
        assert!(!existed);
        let (again, def, existed) = registry.get_or_create_definition("en-Latn").unwrap();
        assert!(existed);
        assert_eq!(again, en);
        assert_eq!(def.script(), Some(Script::LATIN));
        assert_eq!(registry.len(), 1);

        // A non-default script is a different writing system.
        let (cyrl, _, existed) = registry.get_or_create_definition("en-Cyrl").unwrap();
        assert!(!existed);
        assert_ne!(cyrl, en);
    }

    #[test]
    fn created_definitions_use_metadata_and_config() {
        let registry = Registry::new(RegistryConfig::in_memory().with_default_font("Gentium"));
        let def = registry.create("fr-CA").unwrap();
        assert_eq!(def.display_name, "French");
        assert_eq!(def.abbreviation, "Fre");
        assert_eq!(def.default_font, "Gentium");
        assert_eq!(def.collation, Collation::standard());
        assert!(!registry.exists_tag("fr-CA"));

        let zh = registry.create("zh-TW").unwrap();
        assert_eq!(zh.script(), Some(Script::HAN_TRADITIONAL));
        assert_eq!(zh.tag(), "zh-TW");
        assert_eq!(
            zh.collation,
            Collation::System {
                tag: "zh-TW".to_owned()
            }
        );

        let unknown = registry.create("xyz").unwrap();
        assert_eq!(unknown.display_name, "xyz");
        let default = Registry::new(RegistryConfig::default());
        assert_eq!(default.create("en").unwrap().default_font, DEFAULT_FONT);
    }

    #[test]
    fn create_from_subtags() {
        let registry = registry();
        let def = registry
            .create_from_subtags("en", Some("Latn"), Some("US"), &["fonipa", "x-etic"])
            .unwrap();
        assert_eq!(def.tag(), "en-US-fonipa-x-etic");
        assert!(matches!(
            registry.create_from_subtags("en", Some("Lat"), None, &[]),
            Err(RegistryError::InvalidTag { tag, .. }) if tag == "en-Lat"
        ));
    }

    #[test]
    fn invalid_tags_are_rejected() {
        let registry = registry();
        assert!(matches!(
            registry.get_or_create_handle("e"),
            Err(RegistryError::InvalidTag { .. })
        ));
        assert!(registry.is_empty());
        assert_eq!(registry.tag_to_handle("not a tag"), None);
    }

    #[test]
    fn set_rejects_duplicates() {
        let registry = registry();
        let def = registry.create("de").unwrap();
        let handle = registry.set(def.clone()).unwrap();
        assert_eq!(registry.state("de"), EntryState::Registered(handle));
        assert!(matches!(
            registry.set(def),
            Err(RegistryError::DuplicateTag(tag)) if tag == "de"
        ));
    }

    #[test]
    fn update_rekeys_handle() {
        let registry = registry();
        let en = registry.get_or_create_handle("en").unwrap();
        let fr = registry.get_or_create_handle("fr").unwrap();
        registry
            .update(en, |def| {
                def.add_variant("fonipa").unwrap();
            })
            .unwrap();
        assert_eq!(registry.handle_to_tag(en).as_deref(), Some("en-fonipa"));
        assert_eq!(registry.tag_to_handle("en"), None);

        let err = registry
            .update(en, |def| {
                *def = registry_def("fr");
            })
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateTag(_)));
        assert_eq!(registry.handle_to_tag(en).as_deref(), Some("en-fonipa"));
        assert_eq!(registry.handle_to_tag(fr).as_deref(), Some("fr"));
    }

    fn registry_def(tag: &str) -> crate::WritingSystemDefinition {
        registry().create(tag).unwrap()
    }

    #[test]
    fn audio_identity_is_order_independent() {
        let registry = registry();
        let a = registry.get_or_create_handle(UNLISTED_LANGUAGE).unwrap();
        registry
            .update(a, |def| {
                def.add_private_use(AUDIO_PRIVATE_USE).unwrap();
                def.set_script(Some(Script::UNWRITTEN));
            })
            .unwrap();
        assert_eq!(registry.handle_to_tag(a).as_deref(), Some("qaa-Zxxx-x-audio"));
        assert!(registry.definition(a).unwrap().is_audio());
    }

    #[test]
    fn extend_existing_policy() {
        let config =
            RegistryConfig::in_memory().with_extension_policy(ExtensionPolicy::ExtendExisting);
        let registry = Registry::new(config);
        let en = registry.get_or_create_handle("en-US").unwrap();
        let (handle, def, existed) = registry.get_or_create_definition("en-US-fonipa").unwrap();
        assert!(existed);
        assert_eq!(handle, en);
        assert_eq!(def.tag(), "en-US-fonipa");
        assert_eq!(registry.tag_to_handle("en-US"), None);

        let sibling = Registry::new(RegistryConfig::in_memory());
        let en = sibling.get_or_create_handle("en-US").unwrap();
        let (handle, _, existed) = sibling.get_or_create_definition("en-US-fonipa").unwrap();
        assert!(!existed);
        assert_ne!(handle, en);
    }

    #[test]
    fn extend_existing_falls_back_to_sibling_when_ambiguous() {
        let config =
            RegistryConfig::in_memory().with_extension_policy(ExtensionPolicy::ExtendExisting);
        let registry = Registry::new(config);
        let us = registry.get_or_create_handle("en-US").unwrap();
        let ipa = Registry::new(RegistryConfig::in_memory())
            .create("en-US-fonipa")
            .unwrap();
        let ipa = registry.set(ipa).unwrap();

        let (handle, def, existed) = registry
            .get_or_create_definition("en-US-fonipa-x-etic")
            .unwrap();
        assert!(!existed);
        assert_ne!(handle, us);
        assert_ne!(handle, ipa);
        assert_eq!(def.tag(), "en-US-fonipa-x-etic");
        assert_eq!(registry.handle_to_tag(us).as_deref(), Some("en-US"));
        assert_eq!(registry.handle_to_tag(ipa).as_deref(), Some("en-US-fonipa"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn extend_subtags_appends_missing_subtags() {
        let registry = registry();
        let mut base = registry.create("en-fonipa").unwrap();
        let target = registry.create("en-fonipa-1996-x-etic-emic").unwrap();
        extend_subtags(&mut base, &target).unwrap();
        assert_eq!(base.tag(), "en-fonipa-1996-x-etic-emic");
        assert_eq!(base.display_name, "English");

        // Nothing to add leaves the definition alone.
        let before = base.clone();
        extend_subtags(&mut base, &target).unwrap();
        assert_eq!(base, before);
    }

    #[test]
    fn control_characters_are_rejected() {
        let registry = registry();
        let mut def = registry.create("de").unwrap();
        def.abbreviation = "D\u{7}".to_owned();
        assert!(matches!(
            registry.set(def),
            Err(RegistryError::UnstorableText { field: "abbreviation", .. })
        ));
        assert!(registry.is_empty());

        let en = registry.get_or_create_handle("en").unwrap();
        let err = registry
            .update(en, |def| def.display_name = "Eng\u{0}lish".to_owned())
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnstorableText { .. }));
        assert_eq!(registry.definition(en).unwrap().display_name, "English");

        registry
            .update(en, |def| def.display_name = "Eng\tlish\r\n".to_owned())
            .unwrap();
    }

    #[test]
    fn prefix_lookup_prefers_private_entries() {
        let registry = registry();
        registry.get_or_create_handle("en-US").unwrap();
        let private = registry.get_or_create_handle("en-x-custom").unwrap();
        assert_eq!(registry.find_by_prefix("en"), Some(private));
        registry.get_or_create_handle("en-x-other").unwrap();
        assert_eq!(registry.find_by_prefix("en"), None);
        let exact = registry.get_or_create_handle("en").unwrap();
        assert_eq!(registry.find_by_prefix("en"), Some(exact));

        let public = Registry::new(
            RegistryConfig::in_memory().with_prefix_preference(PrefixPreference::PublicOnly),
        );
        let us = public.get_or_create_handle("en-US").unwrap();
        public.get_or_create_handle("en-x-custom").unwrap();
        assert_eq!(public.find_by_prefix("en"), Some(us));
    }

    #[test]
    fn snapshot_is_isolated_from_writes() {
        let registry = registry();
        let en = registry.get_or_create_handle("en").unwrap();
        let snapshot = registry.snapshot();
        registry.get_or_create_handle("fr").unwrap();
        registry
            .update(en, |def| def.display_name = "Changed".to_owned())
            .unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.tag_to_handle("en-Latn"), Some(en));
        assert_eq!(snapshot.definition(en).unwrap().display_name, "English");
        assert_eq!(registry.definition(en).unwrap().display_name, "Changed");
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let config = RegistryConfig::in_memory().with_store_dir(dir.path());
        let registry = Registry::new(config.clone());
        let en = registry.get_or_create_handle("en").unwrap();
        registry.get_or_create_handle("de").unwrap();
        assert_eq!(registry.state("en"), EntryState::Registered(en));
        assert_eq!(registry.save().unwrap(), 2);
        assert_eq!(registry.state("en"), EntryState::Persisted(en));

        registry
            .update(en, |def| def.spell_checking_id = Some("en_US".to_owned()))
            .unwrap();
        assert_eq!(registry.state("en"), EntryState::Registered(en));
        registry.save().unwrap();

        // Handles are assigned in sorted tag order on open.
        let reopened = Registry::open(config).unwrap();
        let de = reopened.tag_to_handle("de").unwrap();
        let en2 = reopened.tag_to_handle("en").unwrap();
        assert!(de < en2);
        assert_eq!(
            reopened.definition(en2).unwrap().spell_checking_id.as_deref(),
            Some("en_US")
        );
        assert_eq!(reopened.state("de"), EntryState::Persisted(de));

        // Reload keeps existing handles.
        assert_eq!(registry.reload().unwrap(), 2);
        assert_eq!(registry.tag_to_handle("en"), Some(en));
    }

    #[test]
    fn save_without_store_is_noop() {
        let registry = registry();
        registry.get_or_create_handle("en").unwrap();
        assert_eq!(registry.save().unwrap(), 0);
        assert_eq!(registry.reload().unwrap(), 0);
        assert_eq!(registry.len(), 1);
    }
}
