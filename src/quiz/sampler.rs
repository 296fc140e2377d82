use super::random::RandomSource;

/// Picks `min(count, items.len())` distinct elements uniformly at random.
///
/// `items` is left untouched; order of the result carries no meaning.
pub fn sample_without_replacement<T, R>(items: &[T], count: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: RandomSource + ?Sized,
{
    let mut pool = items.to_vec();
    let take = count.min(pool.len());

    // partial Fisher-Yates: the first `take` slots end up as the sample
    for i in 0..take {
        let j = i + rng.pick_index(pool.len() - i);
        pool.swap(i, j);
    }

    pool.truncate(take);
    pool
}
