//! Offline stand-in payloads
//!
//! When the provider cannot be reached the bridge still answers with an
//! envelope of the same shape. The city is guessed by substring matching
//! against a short table of known places. This is cosmetic only: it makes the
//! stand-in look plausible for the most common queries and is not a
//! geocoder. Unmatched input gets [`DEFAULT_PLACE`].

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde_json::{Value, json};

use crate::models::{GeoEnvelope, SUCCESS_STATUS, WeatherEnvelope};

/// A place the fallback generator can recognise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownPlace {
    /// Substring looked for in the query
    pub keyword: &'static str,
    /// Short labels as used in forecasts
    pub city: &'static str,
    pub province: &'static str,
    /// Full labels as used in geocodes
    pub city_full: &'static str,
    pub province_full: &'static str,
    pub adcode: &'static str,
    pub citycode: &'static str,
    /// Representative `"lon,lat"`
    pub location: &'static str,
}

const BEIJING: KnownPlace = KnownPlace {
    keyword: "北京",
    city: "北京",
    province: "北京",
    city_full: "北京市",
    province_full: "北京市",
    adcode: "110000",
    citycode: "010",
    location: "116.397428,39.90923",
};

const SHANGHAI: KnownPlace = KnownPlace {
    keyword: "上海",
    city: "上海",
    province: "上海",
    city_full: "上海市",
    province_full: "上海市",
    adcode: "310000",
    citycode: "021",
    location: "121.473701,31.230416",
};

const GUANGZHOU: KnownPlace = KnownPlace {
    keyword: "广州",
    city: "广州",
    province: "广东",
    city_full: "广州市",
    province_full: "广东省",
    adcode: "440100",
    citycode: "020",
    location: "113.264385,23.129112",
};

/// Matched in order, first hit wins
pub static KNOWN_PLACES: [KnownPlace; 3] = [BEIJING, SHANGHAI, GUANGZHOU];

/// Used when no keyword matches
pub static DEFAULT_PLACE: KnownPlace = BEIJING;

/// Fixed values for one synthesized forecast day
struct CastTemplate {
    dayweather: &'static str,
    nightweather: &'static str,
    daytemp: &'static str,
    nighttemp: &'static str,
    daywind: &'static str,
    nightwind: &'static str,
    daypower: &'static str,
    nightpower: &'static str,
}

const TODAY: CastTemplate = CastTemplate {
    dayweather: "晴",
    nightweather: "晴",
    daytemp: "25",
    nighttemp: "15",
    daywind: "南风",
    nightwind: "南风",
    daypower: "≤3级",
    nightpower: "≤3级",
};

const TOMORROW: CastTemplate = CastTemplate {
    dayweather: "多云",
    nightweather: "阴",
    daytemp: "23",
    nighttemp: "13",
    daywind: "北风",
    nightwind: "北风",
    daypower: "4-5级",
    nightpower: "≤3级",
};

impl CastTemplate {
    fn cast(&self, date: NaiveDate) -> Value {
        json!({
            "date": date.format("%Y-%m-%d").to_string(),
            "week": date.weekday().number_from_monday().to_string(),
            "dayweather": self.dayweather,
            "nightweather": self.nightweather,
            "daytemp": self.daytemp,
            "nighttemp": self.nighttemp,
            "daywind": self.daywind,
            "nightwind": self.nightwind,
            "daypower": self.daypower,
            "nightpower": self.nightpower,
        })
    }
}

/// Pick the first known place whose keyword occurs in `text`
#[must_use]
pub fn infer_place(text: &str) -> &'static KnownPlace {
    KNOWN_PLACES
        .iter()
        .find(|place| text.contains(place.keyword))
        .unwrap_or(&DEFAULT_PLACE)
}

/// Two-day stand-in forecast for `city`, dated from the current time
#[must_use]
pub fn fallback_weather(city: &str) -> WeatherEnvelope {
    fallback_weather_at(city, Utc::now())
}

/// Two-day stand-in forecast for `city` as of `now`
#[must_use]
pub fn fallback_weather_at(city: &str, now: DateTime<Utc>) -> WeatherEnvelope {
    let place = infer_place(city);
    let today = now.date_naive();
    let tomorrow = today + Days::new(1);

    WeatherEnvelope {
        status: SUCCESS_STATUS.to_string(),
        info: "OK".to_string(),
        infocode: "10000".to_string(),
        count: "1".to_string(),
        forecasts: vec![json!({
            "city": place.city,
            "adcode": place.adcode,
            "province": place.province,
            "reporttime": now.format("%Y-%m-%d %H:%M:%S").to_string(),
            "casts": [TODAY.cast(today), TOMORROW.cast(tomorrow)],
        })],
    }
}

/// Single stand-in geocode echoing `address`
#[must_use]
pub fn fallback_geo(address: &str) -> GeoEnvelope {
    let place = infer_place(address);

    GeoEnvelope {
        status: SUCCESS_STATUS.to_string(),
        info: "OK".to_string(),
        infocode: "10000".to_string(),
        count: "1".to_string(),
        geocodes: vec![json!({
            "formatted_address": address,
            "country": "中国",
            "province": place.province_full,
            "citycode": place.citycode,
            "city": place.city_full,
            "district": "",
            "township": "",
            "neighborhood": {},
            "building": {},
            "adcode": place.adcode,
            "street": "",
            "number": "",
            "location": place.location,
            "level": "城市",
        })],
    }
}
