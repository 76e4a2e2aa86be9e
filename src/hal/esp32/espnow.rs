//! ESP-NOW link to the receiver.
//!
//! ESP-NOW rides on the Wi-Fi radio but needs no access point: the station
//! interface only has to be started, not connected.
//!
//! # Example
//!
//! ```ignore
//! use cyd_remote::hal::esp32::EspNowLink;
//! use cyd_remote::config::LinkConfig;
//!
//! let link = EspNowLink::new(peripherals.modem, sysloop, Some(nvs), &LinkConfig::default())?;
//! let dispatcher = Dispatcher::new(link, &config.link, config.panel.rpm_limits);
//! ```

use esp_idf_hal::modem::Modem;
use esp_idf_svc::espnow::{EspNow, PeerInfo};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::sys::{wifi_interface_t_WIFI_IF_STA, EspError};
use esp_idf_svc::wifi::{BlockingWifi, ClientConfiguration, Configuration, EspWifi};

use crate::config::LinkConfig;
use crate::traits::{CommandTransport, PeerAddress};

/// ESP-NOW transport for ESP32.
///
/// Owns the Wi-Fi driver for as long as the link exists; dropping the link
/// stops the radio.
pub struct EspNowLink<'a> {
    // Dropped before the radio it rides on
    espnow: EspNow<'static>,
    wifi: BlockingWifi<EspWifi<'a>>,
}

impl<'a> EspNowLink<'a> {
    /// Bring up the radio and register the peer.
    ///
    /// This will:
    /// 1. Initialize the Wi-Fi driver in station mode
    /// 2. Start the radio without joining a network
    /// 3. Initialize ESP-NOW
    /// 4. Register the receiver from `link` as a unicast peer
    ///
    /// # Errors
    ///
    /// Returns an error if any driver call fails. A bad peer registration is
    /// fatal at boot rather than surfacing later as failed sends.
    pub fn new(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: Option<EspDefaultNvsPartition>,
        link: &LinkConfig,
    ) -> anyhow::Result<Self> {
        let esp_wifi = EspWifi::new(modem, sysloop.clone(), nvs)?;
        let mut wifi = BlockingWifi::wrap(esp_wifi, sysloop)?;

        wifi.set_configuration(&Configuration::Client(ClientConfiguration::default()))?;

        log::info!("[ESP-NOW] Starting radio...");
        wifi.start()?;

        let espnow = EspNow::take()?;
        espnow.add_peer(PeerInfo {
            peer_addr: link.peer.octets(),
            channel: link.channel,
            ifidx: wifi_interface_t_WIFI_IF_STA,
            encrypt: link.encrypt,
            ..Default::default()
        })?;

        log::info!(
            "[ESP-NOW] Peer {} registered on channel {}",
            link.peer,
            link.channel
        );

        Ok(Self { espnow, wifi })
    }

    /// Hardware address of this panel's station interface.
    pub fn local_address(&self) -> Option<PeerAddress> {
        self.wifi.wifi().sta_netif().get_mac().ok().map(PeerAddress::new)
    }
}

impl CommandTransport for EspNowLink<'_> {
    type Error = EspError;

    fn is_ready(&self) -> bool {
        self.wifi.is_started().unwrap_or(false)
    }

    fn send(&mut self, peer: &PeerAddress, payload: &[u8]) -> Result<(), EspError> {
        self.espnow.send(peer.octets(), payload)
    }
}
