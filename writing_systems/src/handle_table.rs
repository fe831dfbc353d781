// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bidirectional map between canonical tags and handles.

use std::collections::BTreeMap;
use std::sync::Arc;

use hashbrown::HashMap;
use lang_primitives::WsHandle;

use crate::RegistryError;

/// Bidirectional map that associates canonical language tags with handles.
///
/// Handles are allocated from a monotonic counter starting at [`WsHandle::FIRST`]. A handle
/// is never reused, even after its tag is renamed.
#[derive(Clone, Debug, Default)]
pub struct HandleTable {
    tag_map: HashMap<Arc<str>, WsHandle>,
    handle_map: BTreeMap<WsHandle, Arc<str>>,
    last: u32,
}

impl HandleTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle bound to `tag`.
    pub fn get(&self, tag: &str) -> Option<WsHandle> {
        self.tag_map.get(tag).copied()
    }

    /// Returns the tag bound to `handle`.
    pub fn tag(&self, handle: WsHandle) -> Option<&str> {
        self.handle_map.get(&handle).map(|tag| &**tag)
    }

    /// Returns the handle bound to `tag`, binding the next unused handle if there is none.
    ///
    /// The flag is `true` if the handle was newly allocated.
    pub fn get_or_insert(&mut self, tag: &str) -> Result<(WsHandle, bool), RegistryError> {
        if let Some(handle) = self.get(tag) {
            return Ok((handle, false));
        }
        let handle = self
            .last
            .checked_add(1)
            .and_then(WsHandle::new)
            .ok_or(RegistryError::HandlesExhausted)?;
        self.last = handle.get();
        let tag: Arc<str> = tag.into();
        self.tag_map.insert(tag.clone(), handle);
        self.handle_map.insert(handle, tag);
        Ok((handle, true))
    }

    /// Rebinds `handle` to `new_tag`.
    ///
    /// Fails if the handle is unbound or if `new_tag` is bound to a different handle. Renaming
    /// a handle to its own tag succeeds.
    pub fn rename(&mut self, handle: WsHandle, new_tag: &str) -> Result<(), RegistryError> {
        match self.get(new_tag) {
            Some(existing) if existing == handle => return Ok(()),
            Some(_) => return Err(RegistryError::DuplicateTag(new_tag.to_owned())),
            None => {}
        }
        let old = self
            .handle_map
            .get(&handle)
            .cloned()
            .ok_or(RegistryError::UnknownHandle(handle))?;
        self.tag_map.remove(&old);
        let new_tag: Arc<str> = new_tag.into();
        self.tag_map.insert(new_tag.clone(), handle);
        self.handle_map.insert(handle, new_tag);
        Ok(())
    }

    /// Unbinds `handle`, returning its tag. The handle is not reallocated.
    pub fn remove(&mut self, handle: WsHandle) -> Option<Arc<str>> {
        let tag = self.handle_map.remove(&handle)?;
        self.tag_map.remove(&tag);
        Some(tag)
    }

    /// Returns the number of bound handles.
    pub fn len(&self) -> usize {
        self.handle_map.len()
    }

    /// Returns `true` if no handle is bound.
    pub fn is_empty(&self) -> bool {
        self.handle_map.is_empty()
    }

    /// Returns all bindings in allocation order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (WsHandle, &str)> + Clone + '_ {
        self.handle_map
            .iter()
            .map(|(handle, tag)| (*handle, &**tag))
    }
}
