//! Static mock datasets the stories render.
//!
//! Each dataset is embedded as JSON, parsed on first use and shared for the
//! rest of the process. Nothing here is ever mutated after loading.

mod city_temperature;
mod stock;

pub use city_temperature::{
    CITY_TEMPERATURE_ROWS, CityName, CityTemperature, city_temperature, parse_city_temperature,
};
pub use stock::{StockQuote, parse_stock_closes, stock_closes};
