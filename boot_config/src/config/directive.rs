//! Execution directives resolved as one group.

use crate::layer::SourceRank;
use crate::{BootError, BootResult};

use super::Directive;

/// Every directive offered by a source, with its rank.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct DirectiveGroup {
    offers: Vec<(SourceRank, Directive)>,
}

impl DirectiveGroup {
    pub(crate) fn offer(&mut self, directive: Directive, rank: SourceRank) {
        self.offers.push((rank, directive));
    }

    /// Pick the directive offered at the highest rank.
    ///
    /// Lower-ranked offers are discarded; two different directives at the
    /// winning rank are a user error.
    pub(crate) fn resolve(&self) -> BootResult<Option<(SourceRank, Directive)>> {
        let Some(top) = self.offers.iter().map(|(rank, _)| *rank).max() else {
            return Ok(None);
        };
        let mut winners = self
            .offers
            .iter()
            .filter(|(rank, _)| *rank == top)
            .map(|(_, directive)| directive);
        let Some(first) = winners.next() else {
            return Ok(None);
        };
        if let Some(other) = winners.find(|directive| *directive != first) {
            return Err(BootError::user(
                "config",
                format!("conflicting execution directives from {top}: {first} and {other}"),
            ));
        }
        for (rank, directive) in self.offers.iter().filter(|(rank, _)| *rank < top) {
            tracing::debug!(%rank, %directive, "discarding lower-ranked directive");
        }
        Ok(Some((top, first.clone())))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn empty_group_has_no_directive() {
        assert_eq!(DirectiveGroup::default().resolve(), Ok(None));
    }

    #[rstest]
    fn highest_rank_wins() {
        let mut group = DirectiveGroup::default();
        group.offer(Directive::Module("http.server".into()), SourceRank::ConfigFile);
        group.offer(Directive::Command("pass".into()), SourceRank::CommandLine);
        assert_eq!(
            group.resolve(),
            Ok(Some((SourceRank::CommandLine, Directive::Command("pass".into()))))
        );
    }

    #[rstest]
    fn identical_offers_at_one_rank_agree() {
        let mut group = DirectiveGroup::default();
        group.offer(Directive::Module("venv".into()), SourceRank::Explicit);
        group.offer(Directive::Module("venv".into()), SourceRank::Explicit);
        assert_eq!(
            group.resolve(),
            Ok(Some((SourceRank::Explicit, Directive::Module("venv".into()))))
        );
    }

    #[rstest]
    fn distinct_offers_at_winning_rank_conflict() {
        let mut group = DirectiveGroup::default();
        group.offer(Directive::Module("venv".into()), SourceRank::Explicit);
        group.offer(Directive::Filename("main.py".into()), SourceRank::Explicit);
        let err = group.resolve().expect_err("conflict must fail");
        assert!(err.is_user_error());
        assert!(err.to_string().contains("conflicting execution directives"));
    }
}
