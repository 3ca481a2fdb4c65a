//! Random train/test partition of the examples.

use ndarray::Array1;
use rand::seq::SliceRandom;
use rand::Rng;

/// Boolean train and test masks over `m` examples.
///
/// Exactly `floor(train_fraction · m)` entries of `train` are true, shuffled;
/// `test` is the element-wise complement, so the two masks partition all `m`
/// examples.
pub fn train_test_masks<R: Rng + ?Sized>(
    m: usize,
    train_fraction: f64,
    rng: &mut R,
) -> (Array1<bool>, Array1<bool>) {
    let n_train = ((m as f64 * train_fraction).floor() as usize).min(m);
    let mut mask: Vec<bool> = (0..m).map(|i| i < n_train).collect();
    mask.shuffle(rng);
    let train = Array1::from(mask);
    let test = train.mapv(|t| !t);
    (train, test)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn counts_follow_floor_and_masks_complement() {
        let mut rng = StdRng::seed_from_u64(4);
        for m in [0usize, 1, 3, 7, 10, 1000] {
            let (train, test) = train_test_masks(m, 0.8, &mut rng);
            assert_eq!(train.len(), m);
            assert_eq!(test.len(), m);
            assert_eq!(train.iter().filter(|&&t| t).count(), m * 4 / 5);
            for (a, b) in train.iter().zip(test.iter()) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn shuffle_is_seeded() {
        let a = train_test_masks(50, 0.8, &mut StdRng::seed_from_u64(9));
        let b = train_test_masks(50, 0.8, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
