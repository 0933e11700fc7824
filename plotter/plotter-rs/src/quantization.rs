use num_traits::{Bounded, NumCast, PrimInt, ToPrimitive};
use shared::plotter_hal::{PlotterError, TensorQuantization};

/// Affine mapping between real values and the approximator's fixed-point
/// domain: `real = (quantized - zero_point) * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineQuantParams {
    scale: f64,
    zero_point: i32,
}

impl AffineQuantParams {
    pub fn new(scale: f64, zero_point: i32) -> Result<Self, PlotterError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PlotterError::InvalidQuantizationScale);
        }

        Ok(Self { scale, zero_point })
    }

    pub fn from_tensor(quantization: TensorQuantization) -> Result<Self, PlotterError> {
        Self::new(quantization.scale as f64, quantization.zero_point)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn zero_point(&self) -> i32 {
        self.zero_point
    }

    /// `round(x / scale) + zero_point`, saturated to the range of `Q`.
    /// NaN quantizes to the zero point.
    pub fn quantize<Q>(&self, x: f64) -> Q
    where
        Q: PrimInt,
    {
        let (min, max) = integer_bounds::<Q>();

        let quantized = libm::round(x / self.scale) + self.zero_point as f64;
        let quantized = if quantized.is_nan() {
            self.zero_point as f64
        } else {
            quantized
        };

        <Q as NumCast>::from(quantized.clamp(min, max)).unwrap_or_else(Q::zero)
    }

    pub fn dequantize<Q>(&self, quantized: Q) -> f64
    where
        Q: PrimInt,
    {
        let quantized = quantized.to_f64().unwrap_or(self.zero_point as f64);

        (quantized - self.zero_point as f64) * self.scale
    }

    /// Real interval that `Q` can represent without saturating.
    pub fn representable_range<Q>(&self) -> (f64, f64)
    where
        Q: PrimInt,
    {
        let (min, max) = integer_bounds::<Q>();

        (
            (min - self.zero_point as f64) * self.scale,
            (max - self.zero_point as f64) * self.scale,
        )
    }
}

fn integer_bounds<Q>() -> (f64, f64)
where
    Q: Bounded + ToPrimitive,
{
    (
        Q::min_value().to_f64().unwrap_or(f64::MIN),
        Q::max_value().to_f64().unwrap_or(f64::MAX),
    )
}

pub fn quantize(x: f64, params: &AffineQuantParams) -> i8 {
    params.quantize::<i8>(x)
}

pub fn dequantize(quantized: i8, params: &AffineQuantParams) -> f64 {
    params.dequantize(quantized)
}
