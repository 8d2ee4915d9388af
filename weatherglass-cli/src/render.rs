//! Human-friendly rendering of provider responses.
//!
//! Straight projections of the response fields; no conversion, no derived
//! values. Layout follows the cards of the original app: a headline block,
//! a stat grid, and an hourly strip.

use weatherglass_core::model::{
    CurrentWeatherResponse, HistoricalWeatherResponse, MarineWeatherResponse,
};

pub fn current(response: &CurrentWeatherResponse) {
    let location = &response.location;
    let conditions = &response.current;

    println!();
    println!("{}, {}, {}", location.name, location.region, location.country);
    println!("Local time {}", location.localtime);
    println!();
    println!(
        "  {}°C  {}  (feels like {}°C)",
        conditions.temperature,
        conditions.description().unwrap_or("—"),
        conditions.feelslike
    );
    println!();
    println!("  Humidity     {}%", conditions.humidity);
    println!("  Wind         {} km/h {}", conditions.wind_speed, conditions.wind_dir);
    println!("  Pressure     {} hPa", conditions.pressure);
    println!("  Precip       {} mm", conditions.precip);
    println!("  Cloud cover  {}%", conditions.cloudcover);
    println!("  Visibility   {} km", conditions.visibility);
    println!("  UV index     {}", conditions.uv_index);
    println!();
    println!("Observed at {}", conditions.observation_time);
}

pub fn historical(response: &HistoricalWeatherResponse) {
    let Some(day) = response.first_day() else {
        println!("No historical data returned.");
        return;
    };

    println!();
    if let Some(location) = &response.location {
        println!("{}, {} — {}", location.name, location.country, day.date);
    } else {
        println!("{}", day.date);
    }
    println!();
    println!("  Min {}°   Avg {}°   Max {}°", day.mintemp, day.avgtemp, day.maxtemp);
    println!();
    if let Some(astro) = &day.astro {
        println!("  Sunrise {}   Sunset {}", astro.sunrise, astro.sunset);
        println!("  Sun hours {}h   Moon phase {}", day.sunhour, astro.moon_phase);
        println!();
    }

    if !day.hourly.is_empty() {
        println!("  Hourly:");
        for hour in &day.hourly {
            println!(
                "   {}  {}°  {}%  {}",
                hour_label(&hour.time),
                hour.temperature,
                hour.humidity,
                hour.weather_descriptions.first().map_or("—", String::as_str)
            );
        }
    }
}

pub fn marine(response: &MarineWeatherResponse) {
    let Some(day) = response.first_day() else {
        println!("No marine data returned.");
        return;
    };

    println!();
    if let Some(area) = response.nearest() {
        println!(
            "Nearest area: {}, {} ({}°, {}°)",
            area.region_name().unwrap_or("—"),
            area.country_name().unwrap_or("—"),
            area.latitude,
            area.longitude
        );
        println!();
    }

    println!(
        "Marine conditions — {} (min {}°, max {}°)",
        day.date, day.mintemp_c, day.maxtemp_c
    );
    for hour in &day.hourly {
        println!(
            "  {}  air {}°  water {}°  wind {} km/h {}  swell {} m {} @ {}s  waves {} m  vis {} km  {}",
            hour_label(&hour.time),
            hour.temp_c,
            hour.water_temp_c,
            hour.windspeed_kmph,
            hour.winddir_16_point,
            hour.swell_height_m,
            hour.swell_dir_16_point,
            hour.swell_period_secs,
            hour.sig_height_m,
            hour.visibility,
            hour.description().unwrap_or("—")
        );
    }
}

/// The provider labels hours as "0", "300", … "2100"; display them as
/// "00:00" through "21:00". Anything non-numeric passes through untouched.
fn hour_label(time: &str) -> String {
    match time.parse::<u32>() {
        Ok(t) => format!("{:02}:00", t / 100),
        Err(_) => time.to_string(),
    }
}
