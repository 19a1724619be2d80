//! Avatar board: the catalog rendered against claims and a session.
//!
//! Pure functions of their inputs. Callers re-run them after every
//! state-changing action instead of caching the result.

use serde::Serialize;

use crate::avatar::{CATALOG, ClaimSet};
use crate::session::SessionSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvatarStatus {
    Free,
    UsedByOther,
    SelectedByMe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvatarEntry {
    pub token: &'static str,
    pub label: &'static str,
    pub status: AvatarStatus,
}

/// View model of the avatar section.
#[derive(Debug, Clone, Serialize)]
pub struct AvatarBoard {
    pub entries: Vec<AvatarEntry>,
    pub free_count: usize,
    pub chosen: Option<String>,
    pub reserved: Option<String>,
}

/// Lists every catalog avatar with its status for this session.
///
/// The session's reserved token is `SelectedByMe` even though it is in the
/// claim set. A merely chosen token is `SelectedByMe` only while it is
/// still free.
pub fn list_catalog_with_status(claims: &ClaimSet, session: &SessionSelection) -> Vec<AvatarEntry> {
    CATALOG
        .iter()
        .map(|avatar| {
            let token = avatar.emoji;
            let status = if session.reserved() == Some(token) {
                AvatarStatus::SelectedByMe
            } else if claims.contains(token) {
                AvatarStatus::UsedByOther
            } else if session.chosen() == Some(token) {
                AvatarStatus::SelectedByMe
            } else {
                AvatarStatus::Free
            };
            AvatarEntry {
                token,
                label: avatar.name,
                status,
            }
        })
        .collect()
}

pub fn render_board(claims: &ClaimSet, session: &SessionSelection) -> AvatarBoard {
    let entries = list_catalog_with_status(claims, session);
    let free_count = entries
        .iter()
        .filter(|e| e.status == AvatarStatus::Free)
        .count();
    AvatarBoard {
        entries,
        free_count,
        chosen: session.chosen().map(str::to_string),
        reserved: session.reserved().map(str::to_string),
    }
}
