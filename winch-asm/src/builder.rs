use crate::pack::{pack_count, PUSH_BITS_1, PUSH_BITS_2};
use crate::{Expression, Operation};

/// Fluent constructor of well-formed [`Expression`]s.
///
/// Appends one opcode per call together with its packed immediates; the
/// `push_*` variants load operand literals through the implicit-push flag
/// instead of a separate [`Push`](Operation::Push). Literals are narrowed
/// to `f32` at append time, matching the wire storage.
///
/// # Panics
///
/// Every method that declares a dimension panics when the supplied literal
/// slice does not match it, when more implicit operand slices are given
/// than the opcode can flag, or when a count does not fit its immediate
/// field. The builder refuses to emit a malformed expression.
#[derive(Debug, Default, Clone)]
#[must_use]
pub struct Builder {
    ops: Vec<u8>,
    ints: Vec<u8>,
    floats: Vec<f32>,
}

impl Builder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish the program, transferring ownership of the expression.
    pub fn build(self) -> Expression {
        Expression::new(self.ops, self.ints, self.floats)
    }

    fn op(mut self, op: Operation) -> Self {
        self.ops.push(op.into());
        self
    }

    fn imm(mut self, value: u8) -> Self {
        self.ints.push(value);
        self
    }

    fn imm_count(self, value: usize) -> Self {
        self.imm(u8::try_from(value).expect("immediate does not fit a byte"))
    }

    fn literals(mut self, literals: &[f64]) -> Self {
        self.floats.extend(literals.iter().map(|&v| v as f32));
        self
    }

    fn sized(literals: &[f64], size: usize) -> &[f64] {
        assert_eq!(literals.len(), size, "dimension mismatch");
        literals
    }

    /// Push the literals onto the stack in order.
    pub fn push(self, literals: &[f64]) -> Self {
        self.op(Operation::Push).imm_count(literals.len()).literals(literals)
    }

    /// Discard the top `n` values.
    pub fn pop(self, n: usize) -> Self {
        self.op(Operation::Pop).imm_count(n)
    }

    /// Duplicate the element at depth `n`.
    pub fn dup(self, n: usize) -> Self {
        self.op(Operation::Dup).imm_count(n)
    }

    /// Rotate the top `n` values left (deepest to top).
    pub fn rot_l(self, n: usize) -> Self {
        self.op(Operation::RotL).imm_count(n)
    }

    /// Rotate the top `n` values right (top to deepest).
    pub fn rot_r(self, n: usize) -> Self {
        self.op(Operation::RotR).imm_count(n)
    }

    /// Reverse the top `n` values.
    pub fn rev(self, n: usize) -> Self {
        self.op(Operation::Rev).imm_count(n)
    }

    /// Transpose the top `rows·cols` values.
    pub fn transpose(self, rows: usize, cols: usize) -> Self {
        self.op(Operation::Transpose).imm_count(rows).imm_count(cols)
    }

    /// Scalar addition.
    pub fn add(self) -> Self {
        self.op(Operation::Add)
    }

    /// Scalar subtraction.
    pub fn sub(self) -> Self {
        self.op(Operation::Sub)
    }

    /// Scalar multiplication.
    pub fn mul(self) -> Self {
        self.op(Operation::Mul)
    }

    /// Scalar fused multiply-add.
    pub fn mul_add(self) -> Self {
        self.op(Operation::MulAdd)
    }

    /// Scalar division.
    pub fn div(self) -> Self {
        self.op(Operation::Div)
    }

    /// IEEE-754 remainder.
    pub fn mod_(self) -> Self {
        self.op(Operation::Mod)
    }

    /// Negation.
    pub fn neg(self) -> Self {
        self.op(Operation::Neg)
    }

    /// Absolute value.
    pub fn abs(self) -> Self {
        self.op(Operation::Abs)
    }

    /// Reciprocal.
    pub fn inv(self) -> Self {
        self.op(Operation::Inv)
    }

    /// Exponentiation.
    pub fn pow(self) -> Self {
        self.op(Operation::Pow)
    }

    /// Square root.
    pub fn sqrt(self) -> Self {
        self.op(Operation::Sqrt)
    }

    /// Natural exponential.
    pub fn exp(self) -> Self {
        self.op(Operation::Exp)
    }

    /// Natural logarithm.
    pub fn ln(self) -> Self {
        self.op(Operation::Ln)
    }

    /// Sine.
    pub fn sin(self) -> Self {
        self.op(Operation::Sin)
    }

    /// Cosine.
    pub fn cos(self) -> Self {
        self.op(Operation::Cos)
    }

    /// Tangent.
    pub fn tan(self) -> Self {
        self.op(Operation::Tan)
    }

    /// Arcsine.
    pub fn asin(self) -> Self {
        self.op(Operation::Asin)
    }

    /// Arccosine.
    pub fn acos(self) -> Self {
        self.op(Operation::Acos)
    }

    /// Two-argument arctangent.
    pub fn atan2(self) -> Self {
        self.op(Operation::Atan2)
    }

    /// Elementwise vector addition over two stack vectors.
    pub fn add_vec(self, size: usize) -> Self {
        self.op(Operation::AddVec).imm(pack_count(size, 0, PUSH_BITS_1))
    }

    /// [`add_vec`](Self::add_vec) with the right-hand operand loaded from literals.
    pub fn push_add_vec(self, size: usize, literals: &[f64]) -> Self {
        self.op(Operation::AddVec)
            .imm(pack_count(size, 1, PUSH_BITS_1))
            .literals(Self::sized(literals, size))
    }

    /// Elementwise vector subtraction.
    pub fn sub_vec(self, size: usize) -> Self {
        self.op(Operation::SubVec).imm(pack_count(size, 0, PUSH_BITS_1))
    }

    /// [`sub_vec`](Self::sub_vec) with the right-hand operand loaded from literals.
    pub fn push_sub_vec(self, size: usize, literals: &[f64]) -> Self {
        self.op(Operation::SubVec)
            .imm(pack_count(size, 1, PUSH_BITS_1))
            .literals(Self::sized(literals, size))
    }

    /// Elementwise vector multiplication.
    pub fn mul_vec(self, size: usize) -> Self {
        self.op(Operation::MulVec).imm(pack_count(size, 0, PUSH_BITS_1))
    }

    /// [`mul_vec`](Self::mul_vec) with the right-hand operand loaded from literals.
    pub fn push_mul_vec(self, size: usize, literals: &[f64]) -> Self {
        self.op(Operation::MulVec)
            .imm(pack_count(size, 1, PUSH_BITS_1))
            .literals(Self::sized(literals, size))
    }

    /// Elementwise a·b + c over three stack vectors.
    pub fn mul_add_vec(self, size: usize) -> Self {
        self.op(Operation::MulAddVec)
            .imm(pack_count(size, 0, PUSH_BITS_2))
    }

    /// [`mul_add_vec`](Self::mul_add_vec) with up to two trailing operand
    /// vectors loaded from literals.
    pub fn push_mul_add_vec(self, size: usize, literals: &[&[f64]]) -> Self {
        assert!(literals.len() <= 2, "at most two implicit operands");
        let mut builder = self;
        for operand in literals {
            builder = builder.literals(Self::sized(operand, size));
        }
        builder
            .op(Operation::MulAddVec)
            .imm(pack_count(size, literals.len(), PUSH_BITS_2))
    }

    /// Scale the vector on top by the scalar beneath it.
    pub fn scale_vec(self, size: usize) -> Self {
        self.op(Operation::ScaleVec)
            .imm(pack_count(size, 0, PUSH_BITS_1))
    }

    /// [`scale_vec`](Self::scale_vec) with the vector loaded from literals.
    pub fn push_scale_vec(self, size: usize, literals: &[f64]) -> Self {
        self.op(Operation::ScaleVec)
            .imm(pack_count(size, 1, PUSH_BITS_1))
            .literals(Self::sized(literals, size))
    }

    /// Elementwise vector negation.
    pub fn neg_vec(self, size: usize) -> Self {
        self.op(Operation::NegVec).imm(pack_count(size, 0, PUSH_BITS_1))
    }

    /// [`neg_vec`](Self::neg_vec) with the vector loaded from literals.
    pub fn push_neg_vec(self, size: usize, literals: &[f64]) -> Self {
        self.op(Operation::NegVec)
            .imm(pack_count(size, 1, PUSH_BITS_1))
            .literals(Self::sized(literals, size))
    }

    /// Euclidean norm of the top `size` values.
    pub fn norm_vec(self, size: usize) -> Self {
        self.op(Operation::NormVec)
            .imm(pack_count(size, 0, PUSH_BITS_1))
    }

    /// [`norm_vec`](Self::norm_vec) with the vector loaded from literals.
    pub fn push_norm_vec(self, size: usize, literals: &[f64]) -> Self {
        self.op(Operation::NormVec)
            .imm(pack_count(size, 1, PUSH_BITS_1))
            .literals(Self::sized(literals, size))
    }

    /// Matrix product of A (arows×brows) and B (brows×bcols).
    pub fn mul_mat(self, arows: usize, brows: usize, bcols: usize) -> Self {
        self.op(Operation::MulMat)
            .imm_count(arows)
            .imm_count(brows)
            .imm(pack_count(bcols, 0, PUSH_BITS_1))
    }

    /// [`mul_mat`](Self::mul_mat) with the B matrix loaded from literals.
    pub fn push_mul_mat(
        self,
        arows: usize,
        brows: usize,
        bcols: usize,
        literals: &[f64],
    ) -> Self {
        self.literals(Self::sized(literals, brows * bcols))
            .op(Operation::MulMat)
            .imm_count(arows)
            .imm_count(brows)
            .imm(pack_count(bcols, 1, PUSH_BITS_1))
    }

    /// Polynomial with `coeffs` coefficients over the parameter beneath them.
    pub fn poly_vec(self, coeffs: usize) -> Self {
        self.op(Operation::PolyVec)
            .imm(pack_count(coeffs, 0, PUSH_BITS_1))
    }

    /// [`poly_vec`](Self::poly_vec) with the coefficients loaded from literals.
    pub fn push_poly_vec(self, size: usize, literals: &[f64]) -> Self {
        self.op(Operation::PolyVec)
            .imm(pack_count(size, 1, PUSH_BITS_1))
            .literals(Self::sized(literals, size))
    }

    /// Row-per-power polynomial matrix of `rows` powers and `cols` outputs.
    pub fn poly_mat(self, rows: usize, cols: usize) -> Self {
        self.op(Operation::PolyMat)
            .imm_count(rows)
            .imm(pack_count(cols, 0, PUSH_BITS_1))
    }

    /// [`poly_mat`](Self::poly_mat) with the coefficient matrix loaded from literals.
    pub fn push_poly_mat(self, rows: usize, cols: usize, literals: &[f64]) -> Self {
        self.op(Operation::PolyMat)
            .imm_count(rows)
            .imm(pack_count(cols, 1, PUSH_BITS_1))
            .literals(Self::sized(literals, rows * cols))
    }

    /// Linear interpolation between two stack vectors by the parameter
    /// beneath them.
    pub fn lerp(self, size: usize) -> Self {
        self.op(Operation::Lerp).imm(pack_count(size, 0, PUSH_BITS_2))
    }

    /// [`lerp`](Self::lerp) with up to two trailing operand vectors loaded
    /// from literals.
    pub fn push_lerp(self, size: usize, literals: &[&[f64]]) -> Self {
        assert!(literals.len() <= 2, "at most two implicit operands");
        let mut builder = self;
        for operand in literals {
            builder = builder.literals(Self::sized(operand, size));
        }
        builder
            .op(Operation::Lerp)
            .imm(pack_count(size, literals.len(), PUSH_BITS_2))
    }

    /// Keyed lookup table of `rows` rows and `cols` columns.
    pub fn lut(self, rows: usize, cols: usize) -> Self {
        self.op(Operation::Lut)
            .imm_count(rows)
            .imm(pack_count(cols, 0, PUSH_BITS_1))
    }

    /// [`lut`](Self::lut) with the table loaded from literals.
    pub fn push_lut(self, rows: usize, cols: usize, literals: &[f64]) -> Self {
        self.op(Operation::Lut)
            .imm_count(rows)
            .imm(pack_count(cols, 1, PUSH_BITS_1))
            .literals(Self::sized(literals, rows * cols))
    }
}
