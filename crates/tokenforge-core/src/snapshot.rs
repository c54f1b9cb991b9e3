//! Best-effort restoration of external identifiers from a prior generation.
//!
//! Figma variable ids must survive regeneration so that styles referencing
//! them keep resolving. The previous `tokens.json` is the source of truth:
//! it is read from a baseline (by default the last committed version via
//! `git show HEAD:<path>`), walked depth-first, and flattened into a
//! `dot.path -> figmaId` map consulted during merging.
//!
//! Every failure here is recoverable: a first-ever run has no baseline, so
//! a missing or malformed snapshot degrades to an empty map with a warning
//! rather than aborting the run.

use crate::document::TokenDocument;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

/// Fully-qualified token path -> external identifier.
pub type IdMap = BTreeMap<String, String>;

/// Where the previous generation of the document is read from.
#[derive(Debug, Clone)]
pub enum Baseline {
    /// The last committed version: `git show HEAD:<path>` run in `repo`.
    GitHead { repo: PathBuf, path: String },
    /// A snapshot file on disk.
    File(PathBuf),
    /// No baseline; every token is treated as new.
    Disabled,
}

/// Load the identifier map from the baseline document.
///
/// Never fails: any problem is logged at warn level and yields an empty
/// map, leaving all tokens without restored identifiers.
pub fn load_id_map(baseline: &Baseline) -> IdMap {
    match read_baseline(baseline) {
        Ok(Some(document)) => build_id_map(&document),
        Ok(None) => IdMap::new(),
        Err(reason) => {
            tracing::warn!(
                "Could not load previous token ids ({}); treating all tokens as new",
                reason
            );
            IdMap::new()
        }
    }
}

/// Flatten a document into `path -> figmaId` for every identified token.
pub fn build_id_map(document: &TokenDocument) -> IdMap {
    let mut ids = IdMap::new();
    document.visit_tokens(|path, token| {
        if let Some(id) = &token.extensions.sds.figma_id {
            ids.insert(path.to_string(), id.clone());
        }
    });
    ids
}

fn read_baseline(baseline: &Baseline) -> Result<Option<TokenDocument>, String> {
    let content = match baseline {
        Baseline::Disabled => return Ok(None),
        Baseline::File(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?,
        Baseline::GitHead { repo, path } => {
            let output = Command::new("git")
                .arg("show")
                .arg(format!("HEAD:{}", path))
                .current_dir(repo)
                .output()
                .map_err(|e| format!("failed to run git show: {}", e))?;
            if !output.status.success() {
                return Err(format!(
                    "git show HEAD:{} failed: {}",
                    path,
                    String::from_utf8_lossy(&output.stderr).trim()
                ));
            }
            String::from_utf8(output.stdout)
                .map_err(|e| format!("git show produced non-UTF-8 output: {}", e))?
        }
    };

    let document = serde_json::from_str(&content)
        .map_err(|e| format!("baseline is not a valid token document: {}", e))?;
    Ok(Some(document))
}
