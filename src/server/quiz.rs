use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::Question;

/// Category id that stands for every category.
pub const ALL_CATEGORIES: i64 = 0;

/// Uniformly picks one candidate whose id was not served before.
///
/// `None` means every candidate has been seen and the game is over.
pub fn pick_unseen<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    previous: &HashSet<i64>,
    rng: &mut R,
) -> Option<Question> {
    let unseen: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    unseen.choose(rng).cloned()
}
