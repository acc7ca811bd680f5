//! Module implement the default hasher for tuple elements.

use std::hash::{BuildHasher, Hash, Hasher};

/// Type uses google's city hash to convert [Hash]able elements into
/// ``u64``. Refer [cityhash_rs] for details.
#[derive(Clone, Copy, Default)]
pub struct CityHasher {
    digest: u128,
}

impl CityHasher {
    pub fn new() -> CityHasher {
        CityHasher::default()
    }
}

impl BuildHasher for CityHasher {
    type Hasher = Self;

    #[inline]
    fn build_hasher(&self) -> Self {
        *self
    }
}

impl Hasher for CityHasher {
    fn finish(&self) -> u64 {
        ((self.digest >> 64) as u64) ^ ((self.digest & 0xFFFF_FFFF_FFFF_FFFF) as u64)
    }

    fn write(&mut self, bytes: &[u8]) {
        // fold previous writes in, types like str hash in two writes.
        self.digest = self.digest.rotate_left(11) ^ cityhash_rs::cityhash_110_128(bytes);
    }
}

// Dimension hashes are 32-bit, fold the city digest down.
pub(crate) fn hash32<I>(item: &I) -> u32
where
    I: Hash + ?Sized,
{
    let mut hasher = CityHasher::new();
    item.hash(&mut hasher);
    let digest = hasher.finish();
    ((digest >> 32) as u32) ^ (digest as u32)
}
