//! Simulation parameters and their flat key/value persistence form.
//!
//! [`SimulationConfig`] is loaded leniently: values outside their bounds are
//! clamped, values of the wrong type or missing keys fall back to defaults.
//! Loading never fails. [`SimulationConfig::schema`] describes every field
//! for a control surface, and [`SimulationConfig::edit`] applies one edit
//! through the same rules.

use crate::error::FlowError;
use crate::params::{first_present, param_bool, param_f64_clamped, param_str};
use crate::persistence::SettingsStore;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::f64::consts::TAU;

/// Inclusive bounds and control step for a numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

pub const COUNT: Bound = Bound {
    min: 1000.0,
    max: 300_000.0,
    step: 10_000.0,
};
pub const POINT_SIZE: Bound = Bound {
    min: 1.0,
    max: 10.0,
    step: 1.0,
};
pub const NOISE_SCALE: Bound = Bound {
    min: 0.001,
    max: 0.3,
    step: 0.001,
};
pub const AXIS_SCALE: Bound = Bound {
    min: 1.0,
    max: 10.0,
    step: 0.1,
};

const DEFAULT_COUNT: usize = 300_000;
const DEFAULT_POINT_SIZE: f64 = 1.0;
const DEFAULT_NOISE_SCALE: f64 = 0.1;
const DEFAULT_AXIS_SCALE: f64 = 1.0;

/// Persisted key names, in control-surface order.
pub const KEYS: [&str; 8] = [
    "count",
    "pointSize",
    "noiseScale",
    "inverted",
    "angleMode",
    "depthNoise",
    "cosScale",
    "sinScale",
];

/// How elapsed time perturbs the heading sampled from the noise field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AngleMode {
    /// `2π·n`: the field is frozen in time.
    #[default]
    Static,
    /// `2π·n·t`: headings spin faster as time goes on.
    TimeMultiplied,
    /// `2π·n + t`: every heading rotates uniformly with time.
    TimeAdded,
}

impl AngleMode {
    pub const ALL: [AngleMode; 3] = [
        AngleMode::Static,
        AngleMode::TimeMultiplied,
        AngleMode::TimeAdded,
    ];

    /// Maps a raw noise sample to a heading in radians at `elapsed` seconds.
    pub fn angle(self, n: f64, elapsed: f64) -> f64 {
        match self {
            AngleMode::Static => TAU * n,
            AngleMode::TimeMultiplied => TAU * n * elapsed,
            AngleMode::TimeAdded => TAU * n + elapsed,
        }
    }

    /// The persisted name of the mode.
    pub fn name(self) -> &'static str {
        match self {
            AngleMode::Static => "static",
            AngleMode::TimeMultiplied => "time-multiplied",
            AngleMode::TimeAdded => "time-added",
        }
    }

    /// Parses a persisted name; unknown names are `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

/// The full parameter set of a running simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Number of particles.
    pub count: usize,
    /// Side of each rendered point, in pixels.
    pub point_size: f64,
    /// Spatial frequency of the field: pixel coordinates are multiplied by
    /// this before sampling.
    pub noise_scale: f64,
    /// Dark points on a light, transparent background.
    pub inverted: bool,
    pub angle_mode: AngleMode,
    /// Sample 3D noise with an advancing depth coordinate.
    pub depth_noise: bool,
    /// Horizontal displacement multiplier.
    pub cos_scale: f64,
    /// Vertical displacement multiplier.
    pub sin_scale: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            point_size: DEFAULT_POINT_SIZE,
            noise_scale: DEFAULT_NOISE_SCALE,
            inverted: false,
            angle_mode: AngleMode::Static,
            depth_noise: false,
            cos_scale: DEFAULT_AXIS_SCALE,
            sin_scale: DEFAULT_AXIS_SCALE,
        }
    }
}

impl SimulationConfig {
    /// Builds a config from a persisted flat object, clamping out-of-range
    /// numbers and defaulting anything missing or malformed.
    ///
    /// `num` and `size` are read when `count` and `pointSize` are absent.
    pub fn load_from_persistence(raw: &Value) -> Self {
        let count_key = first_present(raw, &["count", "num"]).unwrap_or("count");
        let size_key = first_present(raw, &["pointSize", "size"]).unwrap_or("pointSize");
        let angle_mode = param_str(raw, "angleMode")
            .and_then(AngleMode::from_name)
            .unwrap_or_default();

        Self {
            count: param_f64_clamped(raw, count_key, DEFAULT_COUNT as f64, COUNT.min, COUNT.max)
                .round() as usize,
            point_size: param_f64_clamped(
                raw,
                size_key,
                DEFAULT_POINT_SIZE,
                POINT_SIZE.min,
                POINT_SIZE.max,
            ),
            noise_scale: param_f64_clamped(
                raw,
                "noiseScale",
                DEFAULT_NOISE_SCALE,
                NOISE_SCALE.min,
                NOISE_SCALE.max,
            ),
            inverted: param_bool(raw, "inverted", false),
            angle_mode,
            depth_noise: param_bool(raw, "depthNoise", false),
            cos_scale: param_f64_clamped(
                raw,
                "cosScale",
                DEFAULT_AXIS_SCALE,
                AXIS_SCALE.min,
                AXIS_SCALE.max,
            ),
            sin_scale: param_f64_clamped(
                raw,
                "sinScale",
                DEFAULT_AXIS_SCALE,
                AXIS_SCALE.min,
                AXIS_SCALE.max,
            ),
        }
    }

    /// Loads from a settings store, merged over defaults.
    ///
    /// An empty store gives the defaults; so does one that fails to load,
    /// after logging a warning.
    pub fn from_store(settings: &dyn SettingsStore) -> Self {
        match settings.load() {
            Ok(Some(raw)) => Self::load_from_persistence(&raw),
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("could not load settings, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Encodes the config as the flat object stored by a settings store.
    pub fn serialize(&self) -> Value {
        json!({
            "count": self.count,
            "pointSize": self.point_size,
            "noiseScale": self.noise_scale,
            "inverted": self.inverted,
            "angleMode": self.angle_mode,
            "depthNoise": self.depth_noise,
            "cosScale": self.cos_scale,
            "sinScale": self.sin_scale,
        })
    }

    /// The same config with every bounded field brought into range.
    pub fn clamped(&self) -> Self {
        Self::load_from_persistence(&self.serialize())
    }

    /// Applies a single control edit, returning the resulting config.
    ///
    /// The value goes through the load rules, so a wrong-typed value resets
    /// that field to its default rather than failing.
    pub fn edit(&self, key: &str, value: Value) -> Result<Self, FlowError> {
        if !KEYS.contains(&key) {
            return Err(FlowError::UnknownParam(key.to_string()));
        }
        let mut raw = self.serialize();
        raw[key] = value;
        Ok(Self::load_from_persistence(&raw))
    }

    /// Describes every field for a control surface: type, bounds, step,
    /// default, display label and enum options.
    pub fn schema() -> Value {
        let defaults = Self::default();
        let bounded = |bound: Bound, kind: &str, default: Value, label: &str| {
            json!({
                "type": kind,
                "min": bound.min,
                "max": bound.max,
                "step": bound.step,
                "default": default,
                "label": label,
            })
        };
        json!({
            "count": bounded(COUNT, "integer", json!(defaults.count), "particles"),
            "pointSize": bounded(POINT_SIZE, "number", json!(defaults.point_size), "size"),
            "noiseScale": bounded(NOISE_SCALE, "number", json!(defaults.noise_scale), "perlin noise"),
            "inverted": {
                "type": "boolean",
                "default": defaults.inverted,
                "label": "invert",
            },
            "angleMode": {
                "type": "enum",
                "options": AngleMode::ALL.map(AngleMode::name),
                "default": defaults.angle_mode,
                "label": "angle mode",
            },
            "depthNoise": {
                "type": "boolean",
                "default": defaults.depth_noise,
                "label": "3d noise",
            },
            "cosScale": bounded(AXIS_SCALE, "number", json!(defaults.cos_scale), "cos scale"),
            "sinScale": bounded(AXIS_SCALE, "number", json!(defaults.sin_scale), "sin scale"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- AngleMode --

    #[test]
    fn static_angle_ignores_time() {
        let n = 0.37;
        assert_eq!(
            AngleMode::Static.angle(n, 0.5),
            AngleMode::Static.angle(n, 42.0)
        );
    }

    #[test]
    fn time_modes_differ_between_timestamps() {
        let n = 0.37;
        for mode in [AngleMode::TimeMultiplied, AngleMode::TimeAdded] {
            assert_ne!(mode.angle(n, 1.0), mode.angle(n, 2.0), "{mode:?}");
        }
    }

    #[test]
    fn angle_formulas() {
        let n = 0.25;
        assert!((AngleMode::Static.angle(n, 3.0) - TAU * 0.25).abs() < 1e-12);
        assert!((AngleMode::TimeMultiplied.angle(n, 3.0) - TAU * 0.75).abs() < 1e-12);
        assert!((AngleMode::TimeAdded.angle(n, 3.0) - (TAU * 0.25 + 3.0)).abs() < 1e-12);
    }

    #[test]
    fn angle_mode_names_round_trip_through_serde() {
        for mode in AngleMode::ALL {
            let json = serde_json::to_value(mode).unwrap();
            assert_eq!(json, Value::String(mode.name().into()));
            assert_eq!(AngleMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(AngleMode::from_name("spiral"), None);
    }

    // -- load / serialize --

    #[test]
    fn defaults_match_documented_values() {
        let c = SimulationConfig::default();
        assert_eq!(c.count, 300_000);
        assert_eq!(c.point_size, 1.0);
        assert_eq!(c.noise_scale, 0.1);
        assert!(!c.inverted);
        assert_eq!(c.angle_mode, AngleMode::Static);
        assert!(!c.depth_noise);
        assert_eq!(c.cos_scale, 1.0);
        assert_eq!(c.sin_scale, 1.0);
    }

    #[test]
    fn load_of_serialized_default_is_default() {
        let d = SimulationConfig::default();
        assert_eq!(SimulationConfig::load_from_persistence(&d.serialize()), d);
    }

    #[test]
    fn load_of_empty_or_non_object_is_default() {
        let d = SimulationConfig::default();
        assert_eq!(SimulationConfig::load_from_persistence(&json!({})), d);
        assert_eq!(SimulationConfig::load_from_persistence(&Value::Null), d);
        assert_eq!(SimulationConfig::load_from_persistence(&json!([1, 2])), d);
    }

    #[test]
    fn load_clamps_out_of_range_values() {
        let raw = json!({
            "count": 5,
            "pointSize": 40,
            "noiseScale": 0.0,
            "cosScale": -2.0,
            "sinScale": 11.5,
        });
        let c = SimulationConfig::load_from_persistence(&raw);
        assert_eq!(c.count, 1000);
        assert_eq!(c.point_size, 10.0);
        assert_eq!(c.noise_scale, 0.001);
        assert_eq!(c.cos_scale, 1.0);
        assert_eq!(c.sin_scale, 10.0);
    }

    #[test]
    fn load_defaults_malformed_values() {
        let raw = json!({
            "count": "lots",
            "pointSize": null,
            "noiseScale": [0.2],
            "inverted": "yes",
            "angleMode": "sideways",
            "depthNoise": 1,
        });
        assert_eq!(
            SimulationConfig::load_from_persistence(&raw),
            SimulationConfig::default()
        );
    }

    #[test]
    fn load_rounds_fractional_count() {
        let c = SimulationConfig::load_from_persistence(&json!({"count": 12_345.6}));
        assert_eq!(c.count, 12_346);
    }

    #[test]
    fn load_reads_legacy_keys() {
        let c = SimulationConfig::load_from_persistence(&json!({
            "num": 20_000,
            "size": 3,
            "noiseScale": 0.05,
            "inverted": true,
        }));
        assert_eq!(c.count, 20_000);
        assert_eq!(c.point_size, 3.0);
        assert_eq!(c.noise_scale, 0.05);
        assert!(c.inverted);
    }

    #[test]
    fn modern_keys_win_over_legacy_keys() {
        let c = SimulationConfig::load_from_persistence(&json!({"num": 20_000, "count": 4000}));
        assert_eq!(c.count, 4000);
    }

    #[test]
    fn null_modern_key_falls_through_to_legacy_key() {
        let c = SimulationConfig::load_from_persistence(&json!({
            "count": null,
            "num": 5000,
            "pointSize": null,
            "size": 4,
        }));
        assert_eq!(c.count, 5000);
        assert_eq!(c.point_size, 4.0);
    }

    // -- from_store --

    struct Unreadable;

    impl SettingsStore for Unreadable {
        fn load(&self) -> Result<Option<Value>, FlowError> {
            Err(FlowError::Serialization("truncated".into()))
        }

        fn save(&mut self, _raw: &Value) -> Result<(), FlowError> {
            Ok(())
        }
    }

    #[test]
    fn from_store_merges_saved_values_over_defaults() {
        let store = crate::persistence::MemoryStore::with(json!({"sinScale": 2.5}));
        let c = SimulationConfig::from_store(&store);
        assert_eq!(c.sin_scale, 2.5);
        assert_eq!(c.count, SimulationConfig::default().count);
    }

    #[test]
    fn from_store_defaults_when_empty_or_unreadable() {
        let empty = crate::persistence::MemoryStore::new();
        assert_eq!(SimulationConfig::from_store(&empty), SimulationConfig::default());
        assert_eq!(SimulationConfig::from_store(&Unreadable), SimulationConfig::default());
    }

    #[test]
    fn serialize_uses_flat_camel_case_keys() {
        let raw = SimulationConfig::default().serialize();
        let obj = raw.as_object().unwrap();
        assert_eq!(obj.len(), KEYS.len());
        for key in KEYS {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(raw["angleMode"], "static");
    }

    #[test]
    fn clamped_repairs_programmatic_values() {
        let wild = SimulationConfig {
            count: 10,
            point_size: 0.0,
            ..SimulationConfig::default()
        };
        let fixed = wild.clamped();
        assert_eq!(fixed.count, 1000);
        assert_eq!(fixed.point_size, 1.0);
    }

    // -- edit / schema --

    #[test]
    fn edit_changes_one_field() {
        let c = SimulationConfig::default()
            .edit("angleMode", json!("time-added"))
            .unwrap();
        assert_eq!(c.angle_mode, AngleMode::TimeAdded);
        assert_eq!(c.count, 300_000);
    }

    #[test]
    fn edit_clamps_value() {
        let c = SimulationConfig::default().edit("count", json!(1)).unwrap();
        assert_eq!(c.count, 1000);
    }

    #[test]
    fn edit_rejects_unknown_key() {
        let err = SimulationConfig::default().edit("speed", json!(2)).unwrap_err();
        assert!(matches!(err, FlowError::UnknownParam(ref k) if k == "speed"));
    }

    #[test]
    fn schema_covers_every_key_with_bounds() {
        let schema = SimulationConfig::schema();
        for key in KEYS {
            assert!(schema.get(key).is_some(), "schema missing {key}");
        }
        assert_eq!(schema["count"]["min"], 1000.0);
        assert_eq!(schema["count"]["max"], 300_000.0);
        assert_eq!(schema["count"]["step"], 10_000.0);
        assert_eq!(schema["noiseScale"]["label"], "perlin noise");
        assert_eq!(schema["angleMode"]["options"].as_array().unwrap().len(), 3);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_raw() -> impl Strategy<Value = Value> {
            (
                -1e6_f64..1e6,
                -100.0_f64..100.0,
                -1.0_f64..1.0,
                any::<bool>(),
                0usize..4,
                any::<bool>(),
                -20.0_f64..20.0,
                -20.0_f64..20.0,
            )
                .prop_map(|(count, size, scale, inv, mode, depth, cs, ss)| {
                    let mode = ["static", "time-multiplied", "time-added", "bogus"][mode];
                    json!({
                        "count": count,
                        "pointSize": size,
                        "noiseScale": scale,
                        "inverted": inv,
                        "angleMode": mode,
                        "depthNoise": depth,
                        "cosScale": cs,
                        "sinScale": ss,
                    })
                })
        }

        proptest! {
            #[test]
            fn serialize_after_load_is_idempotent(raw in any_raw()) {
                let once = SimulationConfig::load_from_persistence(&raw).serialize();
                let twice = SimulationConfig::load_from_persistence(&once).serialize();
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn loaded_values_are_always_in_bounds(raw in any_raw()) {
                let c = SimulationConfig::load_from_persistence(&raw);
                prop_assert!((1000..=300_000).contains(&c.count));
                prop_assert!((POINT_SIZE.min..=POINT_SIZE.max).contains(&c.point_size));
                prop_assert!((NOISE_SCALE.min..=NOISE_SCALE.max).contains(&c.noise_scale));
                prop_assert!((AXIS_SCALE.min..=AXIS_SCALE.max).contains(&c.cos_scale));
                prop_assert!((AXIS_SCALE.min..=AXIS_SCALE.max).contains(&c.sin_scale));
            }
        }
    }
}
