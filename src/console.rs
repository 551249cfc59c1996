//! Интерактивный консольный ввод/вывод

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::types::{SleepPrediction, SleepQuery};

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before all answers were given",
        ));
    }
    Ok(line.trim().to_string())
}

/// Повторяет вопрос, пока ответ не распарсится
fn ask_parsed<T: FromStr, R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<T> {
    loop {
        let answer = ask(input, output, prompt)?;
        match answer.parse() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(output, "Please enter a whole number.")?,
        }
    }
}

pub fn prompt_query<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<SleepQuery> {
    writeln!(output, "=== Sleep Predictor ===")?;
    writeln!(output)?;

    let bedtime = ask(&mut input, &mut output, "Enter bedtime (HH:MM): ")?;
    let screen_time = ask_parsed(
        &mut input,
        &mut output,
        "Enter screen time before bed (minutes): ",
    )?;
    let stress = ask_parsed(&mut input, &mut output, "Enter stress level (1-10): ")?;
    let weather = ask(
        &mut input,
        &mut output,
        "Enter weather (e.g., sunny, rainy, cloudy): ",
    )?;
    let alarms = ask_parsed(&mut input, &mut output, "Enter number of alarms set: ")?;
    let desired_wake = ask(&mut input, &mut output, "Enter desired wake time (HH:MM): ")?;

    Ok(SleepQuery {
        bedtime,
        screen_time,
        stress,
        weather,
        alarms,
        desired_wake,
    })
}

pub fn render_prediction(prediction: &SleepPrediction) -> String {
    format!(
        "=== Results ===\n\
         Predicted sleep duration: {} hours\n\
         Predicted wake up time: {}\n\
         {}",
        prediction.sleep_duration, prediction.predicted_wake_time, prediction.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::wake_time::OVERSLEEP_MESSAGE;
    use std::io::Cursor;

    #[test]
    fn reads_all_six_answers() {
        let input = Cursor::new("23:00\n30\n5\ncloudy\n1\n07:00\n");
        let mut output = Vec::new();
        let query = prompt_query(input, &mut output).unwrap();

        assert_eq!(
            query,
            SleepQuery {
                bedtime: "23:00".to_string(),
                screen_time: 30,
                stress: 5,
                weather: "cloudy".to_string(),
                alarms: 1,
                desired_wake: "07:00".to_string(),
            }
        );
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Enter desired wake time (HH:MM): "));
    }

    #[test]
    fn re_asks_on_non_numeric_answer() {
        let input = Cursor::new("23:00\nlots\n45\n5\nsunny\n2\n06:30\n");
        let mut output = Vec::new();
        let query = prompt_query(input, &mut output).unwrap();

        assert_eq!(query.screen_time, 45);
        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches("Enter screen time before bed").count(), 2);
    }

    #[test]
    fn early_eof_is_an_error() {
        let err = prompt_query(Cursor::new("23:00\n30\n"), Vec::new()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn renders_results_block() {
        let text = render_prediction(&SleepPrediction {
            sleep_duration: 4.6,
            predicted_wake_time: "03:36".to_string(),
            oversleep_warning: true,
            message: OVERSLEEP_MESSAGE.to_string(),
        });
        assert_eq!(
            text,
            "=== Results ===\nPredicted sleep duration: 4.6 hours\nPredicted wake up time: 03:36\n⚠️ Oversleep likely!"
        );
    }
}
