use std::net::IpAddr;

use async_trait::async_trait;

/// Iced-drink threshold used when none is configured, in degrees Celsius.
pub const DEFAULT_ICED_THRESHOLD_CELSIUS: i32 = 30;

/// Decides whether it is too hot outside to offer a hot drink.
///
/// Implementations never fail: whenever the answer cannot be determined they
/// return `false`, so the caller gets hot coffee.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn too_hot_for_hot_drink(&self, caller_ip: Option<IpAddr>) -> bool;
}

/// A weather source that always answers the same way.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedWeather(pub bool);

#[async_trait]
impl WeatherSource for FixedWeather {
    async fn too_hot_for_hot_drink(&self, _caller_ip: Option<IpAddr>) -> bool {
        self.0
    }
}
