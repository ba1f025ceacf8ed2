use std::collections::HashSet;

use vidra_model::{QualityLabel, Source};

use crate::error::PlayerError;

/// Ordered, non-empty set of quality variants for one video.
///
/// Construction is the only validation point: afterwards every index handed
/// out by [`SourceCatalog::position`] is valid for the catalog's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceCatalog {
    sources: Vec<Source>,
}

impl SourceCatalog {
    pub fn new(sources: Vec<Source>) -> Result<Self, PlayerError> {
        if sources.is_empty() {
            return Err(PlayerError::NoSources);
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(sources.len());
        for source in &sources {
            if !seen.insert(source.quality().as_str()) {
                return Err(PlayerError::DuplicateQuality(
                    source.quality().clone(),
                ));
            }
        }

        Ok(Self { sources })
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Source> {
        self.sources.get(index)
    }

    /// Source at an index this catalog handed out. Such indices are always
    /// in range.
    pub(crate) fn at(&self, index: usize) -> &Source {
        &self.sources[index]
    }

    /// Index of the source carrying `label`, if any.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.sources
            .iter()
            .position(|source| source.quality().as_str() == label)
    }

    pub fn labels(&self) -> Vec<QualityLabel> {
        self.sources
            .iter()
            .map(|source| source.quality().clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidra_model::MediaFormat;

    fn source(label: &str) -> Source {
        Source::new(format!("/v/{label}.mp4"), MediaFormat::Mp4, label)
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        assert_eq!(SourceCatalog::new(vec![]), Err(PlayerError::NoSources));
    }

    #[test]
    fn test_duplicate_labels_are_rejected() {
        let result =
            SourceCatalog::new(vec![source("720p"), source("480p"), source("720p")]);
        assert_eq!(
            result,
            Err(PlayerError::DuplicateQuality("720p".into()))
        );
    }

    #[test]
    fn test_position_and_labels_keep_order() {
        let catalog =
            SourceCatalog::new(vec![source("1080p"), source("720p"), source("480p")])
                .unwrap();
        assert_eq!(catalog.position("480p"), Some(2));
        assert_eq!(catalog.position("4k"), None);
        assert_eq!(
            catalog.labels(),
            vec![
                QualityLabel::from("1080p"),
                QualityLabel::from("720p"),
                QualityLabel::from("480p")
            ]
        );
    }
}
