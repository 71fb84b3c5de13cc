//! Squad ranking: the accounts the user collaborated with most.
//!
//! Each [`CollaborationSignal`] adds to one account's score:
//!
//! | Signal | Score | Counts toward |
//! |--------|-------|---------------|
//! | contributor on one of the user's repos | 1 | shared projects |
//! | owner of a repo the user got a PR merged into | 3 | contributions (makes them a maintainer) |
//! | fellow contributor on a repo the user contributed to | 2 | shared projects |

use crate::types::{CollaborationSignal, CollaborationType, SignalKind, SquadMember};

/// Default number of squad members kept.
pub const SQUAD_SIZE: usize = 5;

struct Tally<'a> {
    login: &'a str,
    avatar_url: &'a str,
    score: u32,
    shared_projects: u32,
    contributed_to: u32,
    collaboration_type: CollaborationType,
}

impl<'a> Tally<'a> {
    fn new(signal: &'a CollaborationSignal) -> Self {
        let collaboration_type = match signal.kind {
            SignalKind::MergedPrOwner => CollaborationType::Maintainer,
            _ => CollaborationType::Contributor,
        };
        Self {
            login: &signal.login,
            avatar_url: &signal.avatar_url,
            score: 0,
            shared_projects: 0,
            contributed_to: 0,
            collaboration_type,
        }
    }

    fn record(&mut self, kind: SignalKind) {
        match kind {
            SignalKind::OwnRepoContributor => {
                self.shared_projects += 1;
                self.score += 1;
            }
            SignalKind::MergedPrOwner => {
                self.contributed_to += 1;
                self.score += 3;
                self.collaboration_type = CollaborationType::Maintainer;
            }
            SignalKind::CoContributor => {
                self.shared_projects += 1;
                self.score += 2;
            }
        }
    }
}

/// Rank collaborators by score, keeping the top `limit`.
///
/// Signals naming `username` itself are skipped. The first avatar seen for an
/// account is kept. Ties keep first-seen order.
pub fn rank_squad(
    username: &str,
    signals: &[CollaborationSignal],
    limit: usize,
) -> Vec<SquadMember> {
    let mut tallies: Vec<Tally<'_>> = Vec::new();

    for signal in signals {
        if signal.login.is_empty() || signal.login.eq_ignore_ascii_case(username) {
            continue;
        }
        let idx = match tallies.iter().position(|t| t.login == signal.login) {
            Some(idx) => idx,
            None => {
                tallies.push(Tally::new(signal));
                tallies.len() - 1
            }
        };
        tallies[idx].record(signal.kind);
    }

    tallies.sort_by(|a, b| b.score.cmp(&a.score));

    tallies
        .into_iter()
        .take(limit)
        .map(|t| SquadMember {
            username: t.login.to_string(),
            avatar_url: t.avatar_url.to_string(),
            shared_projects: t.shared_projects + t.contributed_to,
            collaboration_type: t.collaboration_type,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(login: &str, kind: SignalKind) -> CollaborationSignal {
        CollaborationSignal {
            login: login.to_string(),
            avatar_url: format!("https://avatars.example/{}", login),
            kind,
        }
    }

    fn names(squad: &[SquadMember]) -> Vec<&str> {
        squad.iter().map(|m| m.username.as_str()).collect()
    }

    #[test]
    fn test_rank_squad_scoring() {
        use SignalKind::*;
        let signals = vec![
            signal("alice", OwnRepoContributor),
            signal("alice", OwnRepoContributor),
            signal("bob", MergedPrOwner),
            signal("carol", CoContributor),
            signal("carol", OwnRepoContributor),
        ];
        let squad = rank_squad("octocat", &signals, SQUAD_SIZE);

        // bob 3, carol 3, alice 2; bob seen before carol
        assert_eq!(names(&squad), vec!["bob", "carol", "alice"]);
        assert_eq!(squad[0].collaboration_type, CollaborationType::Maintainer);
        assert_eq!(squad[0].shared_projects, 1);
        assert_eq!(squad[1].collaboration_type, CollaborationType::Contributor);
        assert_eq!(squad[1].shared_projects, 2);
        assert_eq!(squad[2].shared_projects, 2);
    }

    #[test]
    fn test_contributor_promoted_to_maintainer() {
        let signals = vec![
            signal("dave", SignalKind::OwnRepoContributor),
            signal("dave", SignalKind::MergedPrOwner),
        ];
        let squad = rank_squad("octocat", &signals, SQUAD_SIZE);
        assert_eq!(squad[0].collaboration_type, CollaborationType::Maintainer);
        assert_eq!(squad[0].shared_projects, 2);
    }

    #[test]
    fn test_self_skipped_and_limit() {
        let mut signals = vec![signal("Octocat", SignalKind::MergedPrOwner)];
        signals.extend(
            ["a", "b", "c", "d", "e", "f", "g"]
                .iter()
                .map(|l| signal(l, SignalKind::CoContributor)),
        );
        let squad = rank_squad("octocat", &signals, SQUAD_SIZE);
        assert_eq!(names(&squad), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_empty() {
        assert!(rank_squad("octocat", &[], SQUAD_SIZE).is_empty());
    }
}
