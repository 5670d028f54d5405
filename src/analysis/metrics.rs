use nalgebra::Vector2;

use crate::dynamics::state::SimulationState;

/// KE = 0.5 * m * |v|^2
pub fn kinetic_energy(state: &SimulationState, mass: f64) -> f64 {
    0.5 * mass * state.vel.norm_squared()
}

/// Straight-line distance from `origin` to the current position.
pub fn displacement(state: &SimulationState, origin: &Vector2<f64>) -> f64 {
    (state.pos - origin).norm()
}

/// Smallest and largest value of one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrema {
    pub min: f64,
    pub max: f64,
}

impl Extrema {
    /// `None` for an empty series.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| {
            Some(match acc {
                Some(Extrema { min, max }) => Extrema { min: min.min(v), max: max.max(v) },
                None => Extrema { min: v, max: v },
            })
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinetic_energy_of_unit_mass() {
        let s = SimulationState::new(0.0, 0.0, 0.0, 3.0, 4.0);
        assert!((kinetic_energy(&s, 1.0) - 12.5).abs() < 1e-12);
        assert!((kinetic_energy(&s, 2.0) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn displacement_is_euclidean() {
        let s = SimulationState::new(1.0, 4.0, 5.0, 0.0, 0.0);
        let d = displacement(&s, &Vector2::new(1.0, 1.0));
        assert!((d - 5.0).abs() < 1e-12);
        assert_eq!(displacement(&s, &s.pos), 0.0);
    }

    #[test]
    fn extrema_of_series() {
        let e = Extrema::of([2.0, -1.0, 7.5, 0.0]).unwrap();
        assert_eq!(e, Extrema { min: -1.0, max: 7.5 });
        assert_eq!(e.span(), 8.5);
        assert!(Extrema::of(Vec::<f64>::new()).is_none());
    }
}
