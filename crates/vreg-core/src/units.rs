// vreg-core/src/units.rs

use uom::si::f64::{Capacitance as UomCapacitance, Inductance as UomInductance, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Capacitance = UomCapacitance;
pub type Inductance = UomInductance;
pub type Time = UomTime;

#[inline]
pub fn henry(v: f64) -> Inductance {
    use uom::si::inductance::henry;
    Inductance::new::<henry>(v)
}

#[inline]
pub fn farad(v: f64) -> Capacitance {
    use uom::si::capacitance::farad;
    Capacitance::new::<farad>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

/// Raw SI magnitudes, for the matrix code that works on plain `f64`.
#[inline]
pub fn to_henry(l: Inductance) -> f64 {
    use uom::si::inductance::henry;
    l.get::<henry>()
}

#[inline]
pub fn to_farad(c: Capacitance) -> f64 {
    use uom::si::capacitance::farad;
    c.get::<farad>()
}

#[inline]
pub fn to_millis(t: Time) -> f64 {
    use uom::si::time::millisecond;
    t.get::<millisecond>()
}

pub mod constants {
    /// Peak of a 220 V RMS grid waveform, the default regulation target.
    pub const GRID_PEAK_V: f64 = 311.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = henry(2.5e-3);
        let _c = farad(5e-5);
        let _dt = s(50e-6);
    }

    #[test]
    fn magnitudes_round_trip_through_si() {
        assert!((to_henry(henry(2.5e-3)) - 2.5e-3).abs() < 1e-15);
        assert!((to_farad(farad(5e-5)) - 5e-5).abs() < 1e-18);
        assert!((to_millis(s(0.025)) - 25.0).abs() < 1e-9);
    }
}
