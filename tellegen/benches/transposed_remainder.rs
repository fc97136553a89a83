use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use num_traits::ConstOne;
use tellegen::math::other::random_elements;
use tellegen::prelude::*;

type F = Zn<1_000_000_007>;

criterion_main!(benches);
criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = transposed_remainder,
              transposed_modular_multiplication,
);

fn random_monic_polynomial(degree: usize) -> Polynomial<F> {
    let mut coefficients = random_elements(degree);
    coefficients.push(F::ONE);
    Polynomial::new(coefficients)
}

fn transposed_remainder(c: &mut Criterion) {
    let mut group = c.benchmark_group("Transposed remainder".to_string());

    for log2_degree in [4, 6, 8, 10] {
        let degree = 1 << log2_degree;
        let num_terms = 2 * degree;
        let modulus = random_monic_polynomial(degree);
        let sequence = random_elements::<F>(degree);
        let alpha = modulus
            .reverse_to_length(degree + 1)
            .formal_power_series_inverse_newton(num_terms - degree)
            .unwrap();

        let id = BenchmarkId::new("naïve", format!("2^{log2_degree}"));
        group.bench_function(id, |b| {
            b.iter(|| naive_rem_t(&sequence, &modulus, num_terms))
        });

        let id = BenchmarkId::new("fast", format!("2^{log2_degree}"));
        group.bench_function(id, |b| b.iter(|| rem_t(&sequence, &modulus, num_terms)));

        let id = BenchmarkId::new("fast, precomputed", format!("2^{log2_degree}"));
        group.bench_function(id, |b| {
            b.iter(|| rem_t_pre(&sequence, &modulus, &alpha, num_terms))
        });
    }
    group.finish();
}

fn transposed_modular_multiplication(c: &mut Criterion) {
    let mut group = c.benchmark_group("Transposed modular multiplication".to_string());

    for log2_degree in [4, 6, 8] {
        let degree = 1 << log2_degree;
        let modulus = random_monic_polynomial(degree);
        let multiplier = Polynomial::new(random_elements(degree));
        let functional = random_elements::<F>(degree);

        let id = BenchmarkId::new("naïve", format!("2^{log2_degree}"));
        group.bench_function(id, |b| {
            b.iter(|| naive_mul_mod_t(&functional, &multiplier, &modulus, degree - 1))
        });

        let id = BenchmarkId::new("fast", format!("2^{log2_degree}"));
        group.bench_function(id, |b| {
            b.iter(|| mul_mod_t(&functional, &multiplier, &modulus, degree - 1))
        });
    }
    group.finish();
}
