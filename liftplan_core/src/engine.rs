//! Calculation engine for progressions.
//!
//! Evaluation runs bottom-up and fans out at every level:
//! - Each week is calculated on its own task
//! - Each session in a week gets its mutators applied, then is calculated
//!   on its own task
//! - Each set in a session is calculated on its own task
//!
//! Every task owns its input. Results are gathered in the original order
//! once all siblings have finished, and the first error in that order is
//! returned. No partially calculated plan is ever handed back.

use crate::gear::Gear;
use crate::progression::new_progression;
use crate::types::{DeloadType, Movement, Progression, Session, Set, StrategyType, Week};
use crate::units::convert_from_to;
use crate::{Error, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Flags that shape how each week is calculated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalculateOptions {
    pub recommend_plates: bool,
    pub warmup: bool,
    pub joker_sets: bool,
    pub auxiliary: StrategyType,
}

/// A complete plan request: lifts, equipment and programming choices
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub movements: Vec<Movement>,
    pub gear: Gear,
    #[serde(rename = "type", default)]
    pub strategy_type: StrategyType,
    #[serde(rename = "deload_type", default)]
    pub deload: DeloadType,
    #[serde(default)]
    pub warmup: bool,
    #[serde(default)]
    pub joker_sets: bool,
    #[serde(default)]
    pub recommend_plates: bool,
}

impl Strategy {
    pub fn options(&self) -> CalculateOptions {
        CalculateOptions {
            recommend_plates: self.recommend_plates,
            warmup: self.warmup,
            joker_sets: self.joker_sets,
            auxiliary: self.strategy_type,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.gear.validate()?;
        self.movements.iter().try_for_each(Movement::validate)
    }

    /// Generate and calculate the full progression for this request
    pub fn progression(&self) -> Result<Progression> {
        self.validate()?;
        tracing::debug!(
            "Calculating progression for {} movements ({}, {}) with gear {}",
            self.movements.len(),
            self.strategy_type,
            self.deload,
            self.gear
        );

        new_progression(&self.movements, self.deload).calculate(self.options(), &self.gear)
    }
}

impl Set {
    /// Fill in the loadable weight (and optionally the plates) for this set.
    ///
    /// The percentage is raised to the empty bar first, so a set is never
    /// lighter than the bar.
    pub fn calculate(&mut self, recommend_plates: bool, gear: &Gear) -> Result<()> {
        let floor = self.movement.floor(gear)?;
        if self.percent < floor {
            self.percent = floor;
        }

        let max = convert_from_to(self.movement.training_max, self.movement.unit, gear.unit);
        let target = max * self.percent / 100.0;
        self.weight = Some(gear.round(target)?);

        if recommend_plates {
            // Best effort: a missing recommendation does not fail the set.
            self.plates = gear.recommend(target).unwrap_or_else(|e| {
                tracing::debug!("No plate recommendation for {}: {}", target, e);
                Vec::new()
            });
        }
        Ok(())
    }
}

impl Session {
    /// Calculate every set concurrently
    pub fn calculate(self, recommend_plates: bool, gear: &Gear) -> Result<Session> {
        let sets = fan_out(self.sets, |mut set| {
            set.calculate(recommend_plates, gear)?;
            Ok(set)
        })?;
        Ok(Session { sets })
    }

    /// Apply the enabled mutators in order: warm-up, jokers, auxiliary
    fn apply_policies(&mut self, options: CalculateOptions, gear: &Gear) -> Result<()> {
        if options.warmup {
            self.add_warmup(gear)?;
        }
        if options.joker_sets {
            self.add_jokers()?;
        }
        self.add_auxiliary(options.auxiliary)
    }
}

impl Week {
    /// Mutate and calculate every session concurrently
    pub fn calculate(self, options: CalculateOptions, gear: &Gear) -> Result<Week> {
        let sessions = fan_out(self.sessions, |mut session| {
            session.apply_policies(options, gear)?;
            session.calculate(options.recommend_plates, gear)
        })?;
        Ok(Week {
            sessions,
            deload: self.deload,
            recommend_plates: options.recommend_plates,
        })
    }
}

impl Progression {
    /// Calculate every week concurrently
    pub fn calculate(self, options: CalculateOptions, gear: &Gear) -> Result<Progression> {
        let weeks = fan_out(self.weeks, |week| week.calculate(options, gear))?;
        Ok(Progression { weeks })
    }
}

/// Run `f` over every item on its own task and wait for all of them.
///
/// Results keep the input order. Siblings are not cancelled when one
/// fails; the first error by index is returned after all have finished.
fn fan_out<T, F>(items: Vec<T>, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(T) -> Result<T> + Sync + Send,
{
    let results: Vec<Result<T>> = items.into_par_iter().map(f).collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        tracing::trace!("{} of {} tasks failed", failed, results.len());
    }
    results.into_iter().collect::<std::result::Result<Vec<T>, Error>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::{Bar, Plates};
    use crate::types::{SetTemplate, SetType};
    use crate::units::Unit;
    use assert_approx_eq::assert_approx_eq;

    fn press() -> Movement {
        Movement::new("over-head press", 175.0, Unit::Lbs)
    }

    fn squat() -> Movement {
        Movement::new("squat", 4000.0, Unit::Lbs)
    }

    fn set_at(movement: &Movement, percent: f64) -> Set {
        Set::working(
            movement,
            &SetTemplate {
                percent,
                reps: 5,
                amrap: false,
            },
        )
    }

    fn strategy() -> Strategy {
        Strategy {
            movements: vec![press(), squat()],
            gear: Gear::default_for(Unit::Lbs),
            strategy_type: StrategyType::FslMulti,
            deload: DeloadType::Deload1,
            warmup: true,
            joker_sets: true,
            recommend_plates: false,
        }
    }

    #[test]
    fn test_set_calculate_rounds_down() {
        let gear = Gear::default_for(Unit::Lbs);
        let mut set = set_at(&press(), 65.0);
        set.calculate(false, &gear).unwrap();

        // 113.75 rounds down to the next 5 lbs step above the bar
        assert_eq!(set.weight, Some(110.0));
        assert!(set.plates.is_empty());
    }

    #[test]
    fn test_set_calculate_clamps_to_floor() {
        let gear = Gear::default_for(Unit::Lbs);
        let movement = Movement::new("press", 100.0, Unit::Lbs);
        let mut set = set_at(&movement, 40.0);
        set.calculate(false, &gear).unwrap();

        assert_approx_eq!(set.percent, 45.0);
        assert_eq!(set.weight, Some(45.0));
    }

    #[test]
    fn test_set_calculate_tiny_training_max() {
        let gear = Gear::default_for(Unit::Lbs);
        let movement = Movement::new("press", 5.0, Unit::Lbs);
        let mut set = set_at(&movement, 65.0);
        set.calculate(true, &gear).unwrap();

        assert_approx_eq!(set.percent, 900.0);
        assert_eq!(set.weight, Some(45.0));
        assert!(set.plates.is_empty());
    }

    #[test]
    fn test_set_calculate_recommends_plates() {
        let gear = Gear::default_for(Unit::Lbs);
        let movement = Movement::new("squat", 200.0, Unit::Lbs);
        let mut set = set_at(&movement, 85.0);
        set.calculate(true, &gear).unwrap();

        assert_eq!(set.weight, Some(170.0));
        assert_eq!(set.plates, vec![2.5, 5.0, 10.0, 45.0]);
    }

    #[test]
    fn test_set_calculate_skips_unloadable_plates() {
        let gear = Gear {
            bar: Bar {
                weight: 45.0,
                unit: Unit::Lbs,
            },
            plates: Plates::new([1e-9], Unit::Lbs),
            unit: Unit::Lbs,
        };
        let movement = Movement::new("squat", 200.0, Unit::Lbs);
        let mut set = set_at(&movement, 85.0);
        set.calculate(true, &gear).unwrap();

        assert_approx_eq!(set.weight.unwrap(), 170.0, 1e-6);
        assert!(set.plates.is_empty());
    }

    #[test]
    fn test_set_calculate_converts_units() {
        let gear = Gear::default_for(Unit::Kg);
        let movement = Movement::new("deadlift", 300.0, Unit::Lbs);
        let mut set = set_at(&movement, 70.0);
        set.calculate(false, &gear).unwrap();

        // 210 lbs is ~95.25 kg, rounded down to a 2.5 kg step over a 20 kg bar
        assert_eq!(set.weight, Some(95.0));
    }

    #[test]
    fn test_set_calculate_errors() {
        let no_plates = Gear {
            plates: Plates {
                weights: vec![],
                unit: Unit::Lbs,
            },
            ..Gear::default()
        };
        let mut set = set_at(&press(), 85.0);
        assert!(matches!(
            set.calculate(false, &no_plates),
            Err(Error::NoPlatesFound)
        ));

        let bad_bar = Gear {
            bar: Bar {
                weight: 0.0,
                unit: Unit::Lbs,
            },
            ..Gear::default()
        };
        assert!(matches!(
            set.calculate(false, &bad_bar),
            Err(Error::InvalidWeight(_))
        ));

        let broken = Movement::new("press", 0.0, Unit::Lbs);
        let mut set = set_at(&broken, 85.0);
        assert!(matches!(
            set.calculate(false, &Gear::default()),
            Err(Error::InvalidWeight(_))
        ));
        assert_eq!(set.weight, None);
    }

    #[test]
    fn test_session_calculate_keeps_order() {
        let gear = Gear::default_for(Unit::Lbs);
        let movement = press();
        let session = Session {
            sets: (0..10).map(|i| set_at(&movement, 30.0 + 7.0 * i as f64)).collect(),
        };
        let calculated = session.clone().calculate(false, &gear).unwrap();

        assert_eq!(calculated.sets.len(), 10);
        for (before, after) in session.sets.iter().zip(&calculated.sets) {
            assert!(after.percent >= before.percent);
            assert!(after.weight.is_some());
        }
        let weights: Vec<f64> = calculated.sets.iter().filter_map(|s| s.weight).collect();
        assert!(weights.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_session_calculate_returns_first_error() {
        crate::logging::init_test();
        let gear = Gear::default_for(Unit::Lbs);
        let session = Session {
            sets: vec![
                set_at(&press(), 65.0),
                set_at(&Movement::new("bad", -1.0, Unit::Lbs), 75.0),
                set_at(&Movement::new("worse", 0.0, Unit::Lbs), 85.0),
            ],
        };
        match session.calculate(false, &gear) {
            Err(Error::InvalidWeight(w)) => assert_eq!(w, -1.0),
            other => panic!("expected InvalidWeight(-1), got {:?}", other),
        }
    }

    #[test]
    fn test_week_calculate_applies_policies() {
        let gear = Gear::default_for(Unit::Lbs);
        let week = Week {
            sessions: vec![Session::from_template(
                &press(),
                crate::templates::working_template(0),
            )],
            deload: false,
            recommend_plates: false,
        };
        let options = CalculateOptions {
            recommend_plates: true,
            warmup: true,
            joker_sets: true,
            auxiliary: StrategyType::FslMulti,
        };
        let week = week.calculate(options, &gear).unwrap();
        assert!(week.recommend_plates);

        let session = &week.sessions[0];
        assert_eq!(session.count_set_type(SetType::Warmup), 4);
        assert_eq!(session.count_set_type(SetType::Working), 3);
        assert_eq!(session.count_set_type(SetType::Joker), 7);
        assert_eq!(session.count_set_type(SetType::Auxiliary), 5);
        assert_eq!(session.sets.len(), 19);

        // warm-ups, working sets, jokers, then auxiliary work
        let order: Vec<SetType> = session.sets.iter().map(|s| s.set_type).collect();
        assert_eq!(order[0], SetType::Warmup);
        assert_eq!(order[4], SetType::Working);
        assert_eq!(order[7], SetType::Joker);
        assert_eq!(order[14], SetType::Auxiliary);

        assert_eq!(session.sets[0].weight, Some(45.0));
        assert!(session.sets.iter().all(|s| s.weight.is_some()));
    }

    #[test]
    fn test_week_calculate_without_policies() {
        let gear = Gear::default_for(Unit::Kg);
        let movement = Movement::new("bench press", 100.0, Unit::Kg);
        let week = Week {
            sessions: vec![Session::from_template(
                &movement,
                crate::templates::working_template(1),
            )],
            deload: true,
            recommend_plates: false,
        };
        let options = CalculateOptions {
            auxiliary: StrategyType::Fsl,
            ..CalculateOptions::default()
        };
        let week = week.calculate(options, &gear).unwrap();
        assert!(week.deload);

        let weights: Vec<f64> = week.sessions[0]
            .sets
            .iter()
            .filter_map(|s| s.weight)
            .collect();
        assert_eq!(weights, vec![70.0, 80.0, 90.0, 70.0]);
    }

    #[test]
    fn test_week_calculate_fails_without_working_sets() {
        let gear = Gear::default_for(Unit::Lbs);
        let week = Week {
            sessions: vec![
                Session::from_template(&press(), crate::templates::working_template(0)),
                Session::default(),
            ],
            deload: false,
            recommend_plates: false,
        };
        let result = week.calculate(CalculateOptions::default(), &gear);
        assert!(matches!(result, Err(Error::SetTypeNotFound(SetType::Working))));
    }

    #[test]
    fn test_strategy_progression() {
        let progression = strategy().progression().unwrap();
        assert_eq!(progression.weeks.len(), 7);
        assert!(progression.weeks[6].deload);

        for week in &progression.weeks {
            for session in &week.sessions {
                for set in &session.sets {
                    let floor = set.movement.floor(&Gear::default()).unwrap();
                    assert!(set.percent >= floor - 1e-9);
                    let weight = set.weight.unwrap();
                    assert!(weight >= 45.0);
                    assert!(set.plates.is_empty());
                }
            }
        }

        // squat training max is capped at 2000 lbs
        let squat = &progression.weeks[0].sessions[1];
        assert_eq!(squat.count_set_type(SetType::Warmup), 5);
        let squat_top = squat.last(SetType::Working).unwrap();
        assert_eq!(squat_top.percent, 85.0);
        assert_eq!(squat_top.weight, Some(1700.0));
    }

    #[test]
    fn test_strategy_progression_with_plates() {
        let mut strategy = strategy();
        strategy.recommend_plates = true;
        strategy.strategy_type = StrategyType::Fsl;
        let progression = strategy.progression().unwrap();

        assert!(progression.weeks.iter().all(|w| w.recommend_plates));
        let top = progression.weeks[0].sessions[0]
            .last(SetType::Working)
            .unwrap();
        // 148.75 lbs target
        assert_eq!(top.weight, Some(145.0));
        assert_eq!(top.plates, vec![5.0, 45.0]);
    }

    #[test]
    fn test_strategy_progression_invalid_movement() {
        let mut strategy = strategy();
        strategy.movements.push(Movement::new("broken", f64::NAN, Unit::Lbs));
        assert!(matches!(
            strategy.progression(),
            Err(Error::InvalidWeight(_))
        ));
    }

    #[test]
    fn test_strategy_json_roundtrip_fields() {
        let json = serde_json::to_value(strategy()).unwrap();
        assert_eq!(json["type"], "FSL Multiple Sets");
        assert_eq!(json["deload_type"], "deload1");
        assert_eq!(json["gear"]["unit"], "LBS");

        let parsed: Strategy = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, strategy());
    }

    #[test]
    fn test_strategy_rejects_unknown_strategy_type() {
        let mut json = serde_json::to_value(strategy()).unwrap();
        json["type"] = serde_json::Value::from("5s PRO");
        assert!(serde_json::from_value::<Strategy>(json).is_err());
    }
}
