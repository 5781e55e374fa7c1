use crate::{
    plan::video::{CropFractions, EffectClass, VideoPlan},
    video::probe::VideoSourceInfo,
};

/// Pixel rectangle kept by a crop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    /// Kept width.
    pub width: u32,
    /// Kept height.
    pub height: u32,
    /// Left offset.
    pub x: u32,
    /// Top offset.
    pub y: u32,
}

/// Resolve crop fractions against a `width` x `height` frame.
///
/// Offsets and sizes are rounded down to even numbers so the result stays
/// valid for 4:2:0 output. Returns `None` when the crop would leave nothing.
pub fn crop_rect(crop: &CropFractions, width: u32, height: u32) -> Option<CropRect> {
    let even = |v: f64| ((v.max(0.0) as u32) / 2) * 2;
    let x = even(f64::from(width) * crop.left);
    let y = even(f64::from(height) * crop.top);
    let right = even(f64::from(width) * crop.right);
    let bottom = even(f64::from(height) * crop.bottom);
    let kept_w = width.checked_sub(x + right)?;
    let kept_h = height.checked_sub(y + bottom)?;
    let kept_w = (kept_w / 2) * 2;
    let kept_h = (kept_h / 2) * 2;
    if kept_w < 2 || kept_h < 2 {
        return None;
    }
    Some(CropRect {
        width: kept_w,
        height: kept_h,
        x,
        y,
    })
}

/// The `-vf` filter chain for `plan`.
pub fn filter_chain(plan: &VideoPlan, source: &VideoSourceInfo) -> String {
    let mut chain = Vec::<String>::new();

    match plan.effect {
        EffectClass::Color => chain.push(color_mix(plan.color_multiplier)),
        EffectClass::LumContrast => chain.push(format!(
            "eq=brightness={:.6}:contrast={:.6}",
            plan.lum_shift / 255.0,
            plan.contrast
        )),
        EffectClass::Gamma => chain.push(format!("eq=gamma={:.6}", plan.gamma)),
        EffectClass::Mild => {
            chain.push(color_mix(halfway(plan.color_multiplier)));
            chain.push(format!(
                "eq=brightness={:.6}:contrast={:.6}:gamma={:.6}",
                plan.lum_shift / 510.0,
                halfway(plan.contrast),
                halfway(plan.gamma)
            ));
        }
    }

    if let Some(rect) = plan
        .crop
        .as_ref()
        .and_then(|c| crop_rect(c, source.width, source.height))
    {
        chain.push(format!(
            "crop={}:{}:{}:{}",
            rect.width, rect.height, rect.x, rect.y
        ));
    }

    chain.push("scale=trunc(iw/2)*2:trunc(ih/2)*2".to_string());
    chain.push("format=yuv420p".to_string());
    chain.join(",")
}

fn color_mix(m: f64) -> String {
    format!("colorchannelmixer=rr={m:.6}:gg={m:.6}:bb={m:.6}")
}

fn halfway(factor: f64) -> f64 {
    1.0 + (factor - 1.0) / 2.0
}

#[cfg(test)]
#[path = "../../tests/unit/video/filters.rs"]
mod tests;
