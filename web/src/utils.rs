/// Seed for a new game, assembled from eight `Math.random` draws of one byte each.
pub(crate) fn js_random_seed() -> u64 {
    let bytes = core::array::from_fn(|_| (256.0 * js_sys::Math::random()) as u8);
    u64::from_be_bytes(bytes)
}
