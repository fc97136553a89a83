use crate::error::TellegenError;
use crate::isomorphism::Isomorphism;
use crate::isomorphism::TensorArray;
use crate::isomorphism::map_indices;
use crate::math::polynomial::Polynomial;
use crate::math::traits::Ring;

impl<R: Ring> Isomorphism<R> {
    /// Φ(b), the monomial coordinates of the unique `F` in `R[z]/(P⊙Q)` with
    /// `F(xy) = Σ b[i][j]·xⁱyʲ`.
    ///
    /// The dual coordinates of `F` are `Tr(F·zᵏ) = Σᵢ Tr(xⁱ⁺ᵏ)·Tr(Bᵢ·yᵏ)`,
    /// where `Bᵢ` is row `i` of `b` read as a polynomial in `y`. Every row is
    /// extended by one transposed remainder.
    ///
    /// # Errors
    ///
    /// Fails if `b` is not a `deg(P)`×`deg(Q)` array.
    pub fn phi1(&self, b: &[Vec<R>]) -> Result<Vec<R>, TellegenError> {
        self.check_array(b)?;
        let size = self.r.degree();

        let row_traces = map_indices(b.len(), |i| {
            let dual = self.q.to_dual(&b[i])?;
            self.q.extend(&dual, size)
        })?;

        let mut dual = vec![R::ZERO; size];
        for (i, row_trace) in row_traces.into_iter().enumerate() {
            let traces_p = &self.traces_p[i..i + size];
            for ((d, t), &t_p) in dual.iter_mut().zip(row_trace).zip(traces_p) {
                *d += t_p * t;
            }
        }

        self.r.to_monomial(&dual)
    }

    /// Φ⁻¹(a), the array of `F(xy)` for the `F` in `R[z]/(P⊙Q)` with monomial
    /// coordinates `a`.
    ///
    /// Row `i` of the partial trace `Σₖ aₖ·Tr(xⁱ⁺ᵏ)·yᵏ mod Q` holds the
    /// x-dual coordinate `i` of every coefficient of `F(xy)` in `y`.
    ///
    /// # Errors
    ///
    /// Fails if `a` does not have `deg(P)·deg(Q)` elements.
    pub fn inverse_phi1(&self, a: &[R]) -> Result<TensorArray<R>, TellegenError> {
        self.check_coordinates(a)?;
        let size = a.len();

        let x_dual_rows = map_indices(self.p.degree(), |i| {
            let traces_p = &self.traces_p[i..i + size];
            let partial_trace = a.iter().zip(traces_p).map(|(&c, &t)| c * t).collect();
            self.q.coordinates_of(&Polynomial::new(partial_trace))
        })?;

        self.x_dual_rows_to_array(&x_dual_rows)
    }
}
