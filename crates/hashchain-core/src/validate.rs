use tracing::debug;

use crate::{validate_structure, Block, Rejection};

/// Check that `candidate` may follow `previous`.
///
/// The checks run in order and stop at the first failure: structure, index,
/// previous-hash linkage, then the recomputed content hash.
pub fn check_next_block(candidate: &Block, previous: &Block) -> Result<(), Rejection> {
    if !validate_structure(candidate) {
        return Err(Rejection::Structural {
            index: candidate.index,
            reason: "fields are not well formed",
        });
    }

    if previous.index.checked_add(1) != Some(candidate.index) {
        return Err(Rejection::IndexMismatch {
            previous: previous.index,
            found: candidate.index,
        });
    }

    if candidate.previous_hash != previous.hash {
        return Err(Rejection::PreviousHashMismatch {
            expected: previous.hash.clone(),
            found: candidate.previous_hash.clone(),
        });
    }

    let computed = candidate.computed_hash();
    if computed != candidate.hash {
        return Err(Rejection::HashMismatch {
            stored: candidate.hash.clone(),
            computed,
        });
    }
    Ok(())
}

pub fn is_valid_next_block(candidate: &Block, previous: &Block) -> bool {
    check_next_block(candidate, previous).is_ok()
}

/// Check every block against its predecessor. Position 0 is trusted and is
/// not reported, so a genesis-only chain yields an empty result.
///
/// Each link is judged on its own: tampering with one block fails that
/// block's entry without failing its successors.
pub fn audit_chain(blocks: &[Block]) -> Vec<(usize, Result<(), Rejection>)> {
    blocks
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let position = i + 1;
            let outcome = check_next_block(&pair[1], &pair[0]);
            if let Err(rejection) = &outcome {
                debug!(position, %rejection, "invalid link");
            }
            (position, outcome)
        })
        .collect()
}

pub fn validate_chain(blocks: &[Block]) -> Vec<(usize, bool)> {
    audit_chain(blocks)
        .into_iter()
        .map(|(position, outcome)| (position, outcome.is_ok()))
        .collect()
}
