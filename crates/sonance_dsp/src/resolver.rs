//! Preset Resolution
//!
//! Maps a preset's gain map onto the active band layout. Presets can be
//! authored against another grid (e.g. 31 bands) so a target band may have no
//! key of its own; in that case the nearest authored frequency wins.
//!
//! Resolution order for a target band `(id, frequency)`:
//! 1. exact key match on the band id, gain returned verbatim
//! 2. nearest parsed key frequency, linear Hz distance, first key wins ties
//! 3. 0 dB when no key parses

use indexmap::IndexMap;

use crate::band::Band;
use crate::presets::Preset;

const KEY_PREFIX: &str = "band-";

/// How a gain was obtained
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolutionSource {
    /// The preset has a key equal to the band id
    ExactId,
    /// Closest parsed key frequency (Hz)
    Nearest { key_hz: f32 },
    /// No key could be parsed
    Fallback,
}

/// Resolved gain for one band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub gain: f32,
    pub source: ResolutionSource,
}

/// Parse a preset key into Hz
///
/// Accepts an optional `band-` prefix followed by a decimal number with an
/// optional `k` (x1000) suffix: `"band-1.25k"` -> 1250, `"32"` -> 32,
/// `"20k"` -> 20000. Anything else, and non-positive values, yield `None`.
pub fn parse_band_key(key: &str) -> Option<f32> {
    let raw = key.strip_prefix(KEY_PREFIX).unwrap_or(key);

    let (number, multiplier) = match raw.strip_suffix(['k', 'K']) {
        Some(rest) => (rest, 1000.0),
        None => (raw, 1.0),
    };

    if !is_plain_decimal(number) {
        return None;
    }

    let value: f32 = number.parse().ok()?;
    let hz = value * multiplier;
    (hz.is_finite() && hz > 0.0).then_some(hz)
}

/// `digits` or `digits.digits`, nothing else (no sign, exponent, or bare dot)
fn is_plain_decimal(s: &str) -> bool {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (s, None),
    };

    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    all_digits(int_part) && frac_part.map_or(true, all_digits)
}

/// Resolve the gain for one target band
pub fn resolve(bands: &IndexMap<String, f32>, target_hz: f32, target_id: &str) -> Resolution {
    if let Some(&gain) = bands.get(target_id) {
        return Resolution {
            gain,
            source: ResolutionSource::ExactId,
        };
    }

    let mut best: Option<(f32, f32, f32)> = None; // (delta, key_hz, gain)
    for (key, &gain) in bands {
        let Some(key_hz) = parse_band_key(key) else {
            continue;
        };
        let delta = (key_hz - target_hz).abs();
        // Strict comparison keeps the first-encountered key on ties
        if best.map_or(true, |(best_delta, _, _)| delta < best_delta) {
            best = Some((delta, key_hz, gain));
        }
    }

    match best {
        Some((_, key_hz, gain)) => Resolution {
            gain,
            source: ResolutionSource::Nearest { key_hz },
        },
        None => Resolution {
            gain: 0.0,
            source: ResolutionSource::Fallback,
        },
    }
}

/// Convenience wrapper returning only the gain
pub fn resolve_gain(bands: &IndexMap<String, f32>, target_hz: f32, target_id: &str) -> f32 {
    resolve(bands, target_hz, target_id).gain
}

/// Resolve a whole preset onto `bands`, keeping everything but the gain
pub fn resolve_bands(preset: &Preset, bands: &[Band]) -> Vec<Band> {
    bands
        .iter()
        .map(|band| band.with_gain(resolve_gain(&preset.bands, band.frequency, &band.id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::default_layout;
    use crate::presets::{PresetCatalog, PresetCategory};
    use approx::assert_relative_eq;

    /// Small deterministic generator for sweep tests
    struct Lcg(u64);

    impl Lcg {
        fn next_f32(&mut self) -> f32 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((self.0 >> 40) as f32) / ((1u64 << 24) as f32)
        }

        fn range(&mut self, lo: f32, hi: f32) -> f32 {
            lo + (hi - lo) * self.next_f32()
        }
    }

    /// ISO 1/3-octave centers used by 31-band graphic EQs
    const THIRD_OCTAVE: [&str; 31] = [
        "20", "25", "31.5", "40", "50", "63", "80", "100", "125", "160", "200", "250", "315", "400",
        "500", "630", "800", "1k", "1.25k", "1.6k", "2k", "2.5k", "3.15k", "4k", "5k", "6.3k", "8k",
        "10k", "12.5k", "16k", "20k",
    ];

    fn default_bands() -> Vec<Band> {
        default_layout()
            .iter()
            .enumerate()
            .map(|(i, spec)| Band::from_spec(i, spec))
            .collect()
    }

    #[test]
    fn test_parse_band_key_examples() {
        assert_eq!(parse_band_key("band-32"), Some(32.0));
        assert_eq!(parse_band_key("32"), Some(32.0));
        assert_eq!(parse_band_key("band-1k"), Some(1000.0));
        assert_eq!(parse_band_key("20k"), Some(20000.0));
        assert_eq!(parse_band_key("1K"), Some(1000.0));
        assert_relative_eq!(parse_band_key("band-1.25k").unwrap(), 1250.0);
        assert_relative_eq!(parse_band_key("band-31.5").unwrap(), 31.5);
    }

    #[test]
    fn test_parse_band_key_rejects_garbage() {
        for key in ["", "band-", "bass", "band-1kHz", "-32", "+32", "1e3", ".5", "5.", "1.2.3", "k", "band-0"] {
            assert_eq!(parse_band_key(key), None, "key {key:?} should not parse");
        }
    }

    #[test]
    fn test_exact_id_wins_over_nearer_key() {
        let mut bands = IndexMap::new();
        bands.insert("band-999".to_string(), 9.0);
        bands.insert("band-1k".to_string(), -3.0);
        let res = resolve(&bands, 999.0, "band-1k");
        assert_eq!(res.source, ResolutionSource::ExactId);
        assert_eq!(res.gain, -3.0);
    }

    #[test]
    fn test_nearest_frequency_fallback() {
        let mut bands = IndexMap::new();
        bands.insert("800".to_string(), 1.0);
        bands.insert("1.25k".to_string(), 2.0);
        let res = resolve(&bands, 1000.0, "band-1k");
        assert_eq!(res.gain, 1.0);
        assert_eq!(res.source, ResolutionSource::Nearest { key_hz: 800.0 });
    }

    #[test]
    fn test_tie_keeps_first_key() {
        let mut bands = IndexMap::new();
        bands.insert("band-900".to_string(), 1.0);
        bands.insert("band-1.1k".to_string(), 2.0);
        assert_eq!(resolve_gain(&bands, 1000.0, "band-1k"), 1.0);

        let mut reversed = IndexMap::new();
        reversed.insert("band-1.1k".to_string(), 2.0);
        reversed.insert("band-900".to_string(), 1.0);
        assert_eq!(resolve_gain(&reversed, 1000.0, "band-1k"), 2.0);
    }

    #[test]
    fn test_unparsable_keys_fall_back_to_zero() {
        let mut bands = IndexMap::new();
        bands.insert("bass".to_string(), 6.0);
        bands.insert("treble".to_string(), 6.0);
        let res = resolve(&bands, 1000.0, "band-1k");
        assert_eq!(res.gain, 0.0);
        assert_eq!(res.source, ResolutionSource::Fallback);

        assert_eq!(resolve_gain(&IndexMap::new(), 1000.0, "band-1k"), 0.0);
    }

    #[test]
    fn test_unparsable_keys_are_skipped_not_fatal() {
        let mut bands = IndexMap::new();
        bands.insert("bass".to_string(), 6.0);
        bands.insert("band-2k".to_string(), 4.0);
        assert_eq!(resolve_gain(&bands, 1000.0, "band-1k"), 4.0);
    }

    #[test]
    fn test_builtin_presets_resolve_exactly_on_native_grid() {
        let bands = default_bands();
        for preset in PresetCatalog::builtin().iter() {
            let resolved = resolve_bands(preset, &bands);
            for band in &resolved {
                let expected = preset.bands.get(&band.id).copied().unwrap_or(0.0);
                assert_eq!(band.gain, expected, "preset {} band {}", preset.id, band.id);
            }
        }
    }

    #[test]
    fn test_exact_grid_property_sweep() {
        // For any gains authored on the active grid, resolution is the identity
        let bands = default_bands();
        let mut rng = Lcg(0x5eed);
        for round in 0..200 {
            let mut preset = Preset::new(format!("p{round}"), "P", PresetCategory::Custom);
            for band in &bands {
                preset.bands.insert(band.id.clone(), rng.range(-24.0, 24.0));
            }
            let resolved = resolve_bands(&preset, &bands);
            for band in &resolved {
                assert_eq!(band.gain, preset.bands[&band.id]);
            }
        }
    }

    #[test]
    fn test_third_octave_onto_ten_band_property_sweep() {
        // For any 31-band preset, each 10-band target gets the gain of the
        // closest authored frequency
        let bands = default_bands();
        let mut rng = Lcg(42);
        for round in 0..200 {
            let mut preset = Preset::new(format!("p{round}"), "P", PresetCategory::Custom);
            for key in THIRD_OCTAVE {
                preset.bands.insert(key.to_string(), rng.range(-12.0, 12.0));
            }

            let resolved = resolve_bands(&preset, &bands);
            for band in &resolved {
                let (min_delta, _) = preset
                    .bands
                    .iter()
                    .filter_map(|(k, &g)| parse_band_key(k).map(|hz| ((hz - band.frequency).abs(), g)))
                    .fold((f32::INFINITY, 0.0), |acc, cur| if cur.0 < acc.0 { cur } else { acc });

                let chosen = preset
                    .bands
                    .iter()
                    .find(|(_, &g)| g == band.gain)
                    .and_then(|(k, _)| parse_band_key(k))
                    .unwrap();
                assert_relative_eq!((chosen - band.frequency).abs(), min_delta);
            }
        }
    }

    #[test]
    fn test_third_octave_spot_values() {
        let mut preset = Preset::new("thirds", "Thirds", PresetCategory::Custom);
        for (i, key) in THIRD_OCTAVE.iter().enumerate() {
            preset.bands.insert(format!("band-{key}"), i as f32);
        }
        let resolved = resolve_bands(&preset, &default_bands());
        // 32 Hz -> 31.5 (index 2), 64 -> 63 (5), 1k exact id "band-1k" (17), 16k exact (29)
        assert_eq!(resolved[0].gain, 2.0);
        assert_eq!(resolved[1].gain, 5.0);
        assert_eq!(resolved[5].gain, 17.0);
        assert_eq!(resolved[9].gain, 29.0);
    }

    #[test]
    fn test_resolve_bands_keeps_layout() {
        let bands = default_bands();
        let preset = PresetCatalog::builtin().get("rock").cloned().unwrap();
        let resolved = resolve_bands(&preset, &bands);
        assert_eq!(resolved.len(), bands.len());
        for (a, b) in resolved.iter().zip(&bands) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.index, b.index);
            assert_eq!(a.frequency, b.frequency);
        }
    }
}
