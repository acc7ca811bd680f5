use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use super::*;

#[test]
fn test_depth() {
    let seed: u64 = random();
    println!("test_depth seed:{}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut counts = [0_usize; 1024];
    let (mut val, n_samples) = (Depth::default(), (rng.gen::<usize>() % 100_000) + 1);
    for _ in 0..n_samples {
        let d = (rng.gen::<u16>() % 1024) as usize;
        counts[d] += 1;
        val.sample(d);
    }

    assert_eq!(val.to_samples(), n_samples);
    {
        let min = counts
            .iter()
            .enumerate()
            .find(|(_, &c)| c > 0)
            .map(|x| x.0)
            .unwrap_or(usize::MAX);
        assert_eq!(val.to_min(), min);
    }
    {
        let max = counts
            .iter()
            .enumerate()
            .rev()
            .find(|(_, &c)| c > 0)
            .map(|x| x.0)
            .unwrap_or(usize::MIN);
        assert_eq!(val.to_max(), max);
    }
    {
        let total: usize = counts.iter().enumerate().map(|(d, c)| d * (*c)).sum();
        let count: usize = counts.iter().sum();
        assert_eq!(val.to_mean(), total / count);
    }

    assert!(!val.to_string().is_empty());
}
