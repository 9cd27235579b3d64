use crate::error::FilterError;

/// A square convolution kernel with row-major weights.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from raw weights.
    ///
    /// # Arguments
    ///
    /// * `size` - The side length of the kernel. Must be odd.
    /// * `weights` - `size * size` weights in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameter`] if `size` is even or zero, or if
    /// the number of weights does not match.
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, FilterError> {
        check_odd_size(size, 1, "kernel")?;
        let expected = kernel_area(size)?;
        if weights.len() != expected {
            return Err(FilterError::InvalidParameter(format!(
                "kernel of size {size} needs {expected} weights, got {}",
                weights.len()
            )));
        }
        Ok(Self { size, weights })
    }

    /// The side length of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The distance from the center to the edge of the kernel.
    pub fn half(&self) -> usize {
        self.size / 2
    }

    /// The weights in row-major order.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// The weight at column `kx` and row `ky`.
    #[inline]
    pub fn get(&self, kx: usize, ky: usize) -> f32 {
        self.weights[ky * self.size + kx]
    }

    /// The sum of all weights.
    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }
}

pub(crate) fn check_odd_size(size: usize, min: usize, what: &str) -> Result<(), FilterError> {
    if size < min || size % 2 == 0 {
        return Err(FilterError::InvalidParameter(format!(
            "{what} size must be odd and >= {min}, got {size}"
        )));
    }
    Ok(())
}

// number of weights in a square kernel, rejecting sizes whose square overflows
fn kernel_area(size: usize) -> Result<usize, FilterError> {
    size.checked_mul(size).ok_or_else(|| {
        FilterError::InvalidParameter(format!("kernel size {size} is too large"))
    })
}

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel. Must be odd.
///
/// # Returns
///
/// A kernel with every weight equal to `1 / kernel_size²`.
pub fn box_kernel(kernel_size: usize) -> Result<Kernel, FilterError> {
    check_odd_size(kernel_size, 1, "box kernel")?;
    let n = kernel_area(kernel_size)?;
    Kernel::new(kernel_size, vec![1.0 / n as f32; n])
}

/// Create a 2D gaussian kernel.
///
/// The weight at offset `(x, y)` from the center is
/// `exp(-(x² + y²) / (2σ²)) / (2πσ²)`, then the whole kernel is divided by its
/// sum so the weights add up to one.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel. Must be odd.
/// * `sigma` - The sigma of the gaussian kernel. Must be positive.
///
/// # Examples
///
/// ```
/// use pixfilter_imgproc::filter::kernels::gaussian_kernel;
///
/// let kernel = gaussian_kernel(3, 1.0).unwrap();
/// assert_eq!(kernel.weights().len(), 9);
/// assert!((kernel.sum() - 1.0).abs() < 1e-5);
/// ```
pub fn gaussian_kernel(kernel_size: usize, sigma: f32) -> Result<Kernel, FilterError> {
    check_odd_size(kernel_size, 1, "gaussian kernel")?;
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(FilterError::InvalidParameter(format!(
            "gaussian sigma must be positive, got {sigma}"
        )));
    }

    let area = kernel_area(kernel_size)?;
    let half = i32::try_from(kernel_size / 2).map_err(|_| {
        FilterError::InvalidParameter(format!("kernel size {kernel_size} is too large"))
    })?;
    let sigma_sq = sigma * sigma;
    let coeff = 1.0 / (2.0 * std::f32::consts::PI * sigma_sq);

    // compute the kernel
    let mut weights = Vec::with_capacity(area);
    for y in -half..=half {
        for x in -half..=half {
            let exponent = -((x * x + y * y) as f32) / (2.0 * sigma_sq);
            weights.push(coeff * exponent.exp());
        }
    }

    // normalize the kernel
    let norm = weights.iter().sum::<f32>();
    if !(norm.is_finite() && norm > 0.0) {
        return Err(FilterError::InvalidParameter(format!(
            "gaussian sigma {sigma} is too small to build a kernel of size {kernel_size}"
        )));
    }
    weights.iter_mut().for_each(|w| *w /= norm);

    Kernel::new(kernel_size, weights)
}

/// The 3x3 sobel kernels for the horizontal and vertical derivatives.
///
/// The kernels are not normalized and sum to zero.
pub fn sobel_kernels() -> (Kernel, Kernel) {
    #[rustfmt::skip]
    let kernel_x = Kernel {
        size: 3,
        weights: vec![
            -1.0, 0.0, 1.0,
            -2.0, 0.0, 2.0,
            -1.0, 0.0, 1.0,
        ],
    };
    #[rustfmt::skip]
    let kernel_y = Kernel {
        size: 3,
        weights: vec![
            -1.0, -2.0, -1.0,
             0.0,  0.0,  0.0,
             1.0,  2.0,  1.0,
        ],
    };
    (kernel_x, kernel_y)
}
