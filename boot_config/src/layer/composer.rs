//! Collects source overlays together with their rank.

use super::SourceRank;

/// A partial set of field values contributed by one source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayLayer<O> {
    rank: SourceRank,
    overlay: O,
}

impl<O> OverlayLayer<O> {
    /// Wrap `overlay` as a layer contributed at `rank`.
    #[must_use]
    pub const fn new(rank: SourceRank, overlay: O) -> Self {
        Self { rank, overlay }
    }

    /// Rank the layer is applied at.
    #[must_use]
    pub const fn rank(&self) -> SourceRank {
        self.rank
    }

    /// Borrow the overlay values.
    #[must_use]
    pub const fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Consume the layer, returning the overlay.
    #[must_use]
    pub fn into_overlay(self) -> O {
        self.overlay
    }
}

/// Builder that accumulates [`OverlayLayer`] values.
///
/// [`LayerComposer::layers`] yields the layers in ascending rank order, with
/// layers of equal rank kept in insertion order.
///
/// ```rust
/// use boot_config::layer::{LayerComposer, SourceRank};
///
/// let mut composer = LayerComposer::new();
/// composer.push_explicit("explicit");
/// composer.push_global_compat("globals");
/// composer.push_command_line("argv");
///
/// let ranks: Vec<_> = composer.layers().iter().map(|layer| layer.rank()).collect();
/// assert_eq!(
///     ranks,
///     [SourceRank::GlobalCompat, SourceRank::CommandLine, SourceRank::Explicit]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct LayerComposer<O> {
    layers: Vec<OverlayLayer<O>>,
}

impl<O> Default for LayerComposer<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> LayerComposer<O> {
    /// Create an empty composer.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Push a legacy global-compatibility layer.
    pub fn push_global_compat(&mut self, overlay: O) {
        self.push_layer(OverlayLayer::new(SourceRank::GlobalCompat, overlay));
    }

    /// Push an environment layer.
    pub fn push_environment(&mut self, overlay: O) {
        self.push_layer(OverlayLayer::new(SourceRank::Environment, overlay));
    }

    /// Push a configuration file layer.
    pub fn push_file(&mut self, overlay: O) {
        self.push_layer(OverlayLayer::new(SourceRank::ConfigFile, overlay));
    }

    /// Push a command-line layer.
    pub fn push_command_line(&mut self, overlay: O) {
        self.push_layer(OverlayLayer::new(SourceRank::CommandLine, overlay));
    }

    /// Push a layer of fields set explicitly by the host.
    pub fn push_explicit(&mut self, overlay: O) {
        self.push_layer(OverlayLayer::new(SourceRank::Explicit, overlay));
    }

    /// Push an arbitrary layer.
    pub fn push_layer(&mut self, layer: OverlayLayer<O>) {
        self.layers.push(layer);
    }

    /// Returns `true` when no layer has been pushed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Consume the composer and return the layers in ascending rank order.
    #[must_use]
    pub fn layers(self) -> Vec<OverlayLayer<O>> {
        let mut layers = self.layers;
        layers.sort_by_key(OverlayLayer::rank);
        layers
    }
}

impl<O> IntoIterator for LayerComposer<O> {
    type Item = OverlayLayer<O>;
    type IntoIter = std::vec::IntoIter<OverlayLayer<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers().into_iter()
    }
}
