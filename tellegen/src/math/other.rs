use rand::Rng;
use rand::distr::Distribution;
use rand::distr::StandardUniform;

/// Generate `n` random elements using [`rand::rng()`].
///
/// For an example implementation of the [`Distribution`] trait for
/// [`StandardUniform`], see [`Zn`][zn].
///
/// [zn]: crate::math::zn::Zn
pub fn random_elements<T>(n: usize) -> Vec<T>
where
    StandardUniform: Distribution<T>,
{
    rand::rng().sample_iter(StandardUniform).take(n).collect()
}
