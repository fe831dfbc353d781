// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::borrow::Cow;

use icu_normalizer::{ComposingNormalizerBorrowed, DecomposingNormalizerBorrowed};

/// A Unicode normalization form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NormalizationForm {
    /// Canonical decomposition. Stored text is expected to be in this form.
    Nfd,
    /// Canonical decomposition followed by canonical composition.
    Nfc,
}

pub(crate) fn is_normalized(text: &str, form: NormalizationForm) -> bool {
    match form {
        NormalizationForm::Nfd => DecomposingNormalizerBorrowed::new_nfd().is_normalized(text),
        NormalizationForm::Nfc => ComposingNormalizerBorrowed::new_nfc().is_normalized(text),
    }
}

pub(crate) fn normalize(text: &str, form: NormalizationForm) -> Cow<'_, str> {
    match form {
        NormalizationForm::Nfd => DecomposingNormalizerBorrowed::new_nfd().normalize(text),
        NormalizationForm::Nfc => ComposingNormalizerBorrowed::new_nfc().normalize(text),
    }
}
