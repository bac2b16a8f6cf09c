use candle_core::{DType, Tensor};

/// Average token vectors, ignoring padding.
///
/// `hidden` is `(batch, seq, dim)`, `attention_mask` is `(batch, seq)` with
/// `1` for real tokens. Returns `(batch, dim)`.
pub fn mean_pool(hidden: &Tensor, attention_mask: &Tensor) -> candle_core::Result<Tensor> {
    let mask = attention_mask.to_dtype(hidden.dtype())?.unsqueeze(2)?;
    let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
    let counts = mask.sum(1)?.maximum(1e-9)?;
    summed.broadcast_div(&counts)
}

/// Scale each row of a `(batch, dim)` tensor to unit length.
pub fn l2_normalize_rows(x: &Tensor) -> candle_core::Result<Tensor> {
    let norms = x
        .to_dtype(DType::F32)?
        .sqr()?
        .sum_keepdim(1)?
        .sqrt()?
        .maximum(1e-12)?;
    x.to_dtype(DType::F32)?.broadcast_div(&norms)
}
