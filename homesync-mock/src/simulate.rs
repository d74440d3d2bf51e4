use std::f64::consts::PI;

use homesync_api::models::SensorReading;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal, NormalError};

const MAX_SUNLIGHT_LUX: f64 = 1000.0;
const MAX_MOONLIGHT_LUX: f64 = 5.0;

const SENSOR_NOISE: f64 = 0.3;

const SUNRISE_START: f64 = 0.23;
const SUNRISE_END: f64 = 0.25;
const SUNSET_START: f64 = 0.73;
const SUNSET_END: f64 = 0.75;

/// Ambient light for a point in the day, `0.0` being midnight.
pub fn simulation_lux(day_fraction: f64) -> f64 {
    let radians = day_fraction * 2.0 * PI;

    if (SUNRISE_START..=SUNSET_END).contains(&day_fraction) {
        if day_fraction <= SUNRISE_END {
            let sunrise = (day_fraction - SUNRISE_START) / (SUNRISE_END - SUNRISE_START) * PI / 2.0;
            sunrise.sin() * MAX_SUNLIGHT_LUX
        } else if day_fraction >= SUNSET_START {
            let sunset = (day_fraction - SUNSET_START) / (SUNSET_END - SUNSET_START) * PI / 2.0;
            sunset.cos() * MAX_SUNLIGHT_LUX
        } else {
            MAX_SUNLIGHT_LUX
        }
    } else {
        // Moonlight peaks at midnight
        (radians + PI).cos().max(0.0) * (MAX_MOONLIGHT_LUX - 0.01) + 0.01
    }
}

/// Photoresistor reading reported by the device, which rises as the room
/// gets darker.
pub fn simulated_darkness(day_fraction: f64) -> f64 {
    (MAX_SUNLIGHT_LUX - simulation_lux(day_fraction)).round()
}

pub fn simulated_humidity(day_fraction: f64) -> f64 {
    let radians = day_fraction * 2.0 * PI;

    if (0.3..=0.7).contains(&day_fraction) {
        (radians.sin().max(0.0) * 25.0 + 65.0).round()
    } else {
        (radians.cos().max(0.0) * 30.0 + 60.0).round()
    }
}

/// Afternoon peak around 28 °C, night floor around 16 °C.
pub fn simulated_temperature(day_fraction: f64) -> f64 {
    let radians = (day_fraction - 0.375) * 2.0 * PI;

    22.0 + radians.sin() * 6.0
}

/// Produces a compressed day of readings with a little sensor noise.
pub struct Simulator {
    rng: StdRng,
    noise: Normal<f64>,
    ticks_per_day: u32,
    tick: u32,
}

impl Simulator {
    pub fn new(seed: u64, ticks_per_day: u32) -> Result<Self, NormalError> {
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            noise: Normal::new(0.0, SENSOR_NOISE)?,
            ticks_per_day: ticks_per_day.max(1),
            tick: 0,
        })
    }

    pub fn day_fraction(&self) -> f64 {
        (self.tick % self.ticks_per_day) as f64 / self.ticks_per_day as f64
    }

    pub fn reading_at(&mut self, day_fraction: f64) -> SensorReading {
        let temperature = simulated_temperature(day_fraction) + self.noise.sample(&mut self.rng);
        let humidity = simulated_humidity(day_fraction) + self.noise.sample(&mut self.rng);

        SensorReading {
            temperature: (temperature * 10.0).round() / 10.0,
            humidity: (humidity.clamp(0.0, 100.0) * 10.0).round() / 10.0,
            light: simulated_darkness(day_fraction),
        }
    }

    pub fn next_reading(&mut self) -> SensorReading {
        let reading = self.reading_at(self.day_fraction());
        self.tick = self.tick.wrapping_add(1);
        reading
    }
}
