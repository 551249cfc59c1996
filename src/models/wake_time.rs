//! Время пробуждения и предупреждение о просыпании

use crate::preprocessing::clock::MINUTES_PER_DAY;

pub const OVERSLEEP_MESSAGE: &str = "⚠️ Oversleep likely!";
pub const ON_TIME_MESSAGE: &str = "✅ You will wake on time!";

/// Минуты от полуночи, когда человек проснётся.
///
/// Дробные минуты отбрасываются (усечение, не округление). Переход через
/// полночь берётся по модулю суток, поэтому и очень длинные интервалы
/// дают корректное время суток.
pub fn wake_minutes(bedtime_minutes: i64, sleep_hours: f64) -> i64 {
    // `as` насыщает при переполнении; оба слагаемых сводятся к суткам до сложения
    let slept = (sleep_hours * 60.0) as i64;
    (bedtime_minutes.rem_euclid(MINUTES_PER_DAY) + slept.rem_euclid(MINUTES_PER_DAY))
        .rem_euclid(MINUTES_PER_DAY)
}

/// Буквальное сравнение минут от полуночи.
///
/// Корректно, только если желаемое время пробуждения лежит "следующим утром"
/// в той же шкале, что и предсказанное: после позднего отбоя "01:00" не
/// трактуется как следующий день.
pub fn is_oversleep(predicted_wake_minutes: i64, desired_wake_minutes: i64) -> bool {
    predicted_wake_minutes > desired_wake_minutes
}

pub fn oversleep_message(oversleep: bool) -> &'static str {
    if oversleep {
        OVERSLEEP_MESSAGE
    } else {
        ON_TIME_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::clock::{minutes_to_time, time_to_minutes};

    fn wake(bedtime: &str, hours: f64) -> String {
        minutes_to_time(wake_minutes(time_to_minutes(bedtime).unwrap(), hours))
    }

    #[test]
    fn wraps_past_midnight() {
        assert_eq!(wake("23:30", 1.0), "00:30");
    }

    #[test]
    fn same_day_wake() {
        assert_eq!(wake("22:00", 1.5), "23:30");
    }

    #[test]
    fn truncates_fractional_minutes() {
        // 7.999 ч = 479.94 мин -> 479
        assert_eq!(wake_minutes(0, 7.999), 479);
    }

    #[test]
    fn multi_day_durations_stay_on_the_clock() {
        assert_eq!(wake_minutes(1380, 49.0), (1380 + 49 * 60) % 1440);
        assert!((0..MINUTES_PER_DAY).contains(&wake_minutes(1439, 1000.0)));
    }

    #[test]
    fn extreme_inputs_do_not_overflow() {
        assert_eq!(wake_minutes(i64::MAX, 4.5), (i64::MAX % 1440 + 270) % 1440);
        assert!((0..MINUTES_PER_DAY).contains(&wake_minutes(i64::MIN, 4.0)));
        assert!((0..MINUTES_PER_DAY).contains(&wake_minutes(i64::MAX, f64::MAX)));
        // Для обычных значений результат прежний
        assert_eq!(wake_minutes(1380, 4.5), 210);
    }

    #[test]
    fn oversleep_is_strictly_after_desired() {
        assert!(is_oversleep(421, 420));
        assert!(!is_oversleep(420, 420));
        assert!(!is_oversleep(216, 420));
        assert_eq!(oversleep_message(true), OVERSLEEP_MESSAGE);
        assert_eq!(oversleep_message(false), ON_TIME_MESSAGE);
    }

    #[test]
    fn small_desired_time_is_compared_literally() {
        // Отбой 02:00, 8 ч сна -> 10:00; желаемое 01:00 считается тем же днём
        assert!(is_oversleep(wake_minutes(120, 8.0), 60));
    }
}
