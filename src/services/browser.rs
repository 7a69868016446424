use std::time::Duration;

use rand::seq::SliceRandom;
use thirtyfour::{error::WebDriverError, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};

const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(60);

pub struct BrowserPool {
    pub drivers: Vec<WebDriver>,
}

impl BrowserPool {
    pub async fn new(webdriver_url: &str, pool_size: u16) -> Result<Self, WebDriverError> {
        let mut drivers = Vec::with_capacity(pool_size as usize);

        for _ in 0..pool_size {
            let mut caps = DesiredCapabilities::chrome();
            caps.set_headless()?;
            caps.add_arg("--no-sandbox")?;
            caps.add_arg("--disable-http2")?;

            let driver = WebDriver::new(webdriver_url, caps).await?;
            driver.set_page_load_timeout(PAGE_LOAD_TIMEOUT).await?;
            drivers.push(driver);
        }

        log::info!("Started browser pool with {} sessions", drivers.len());

        Ok(BrowserPool { drivers })
    }

    // Pool is never empty: `new` either connects every session or errors out.
    pub fn any_driver(&self) -> &WebDriver {
        self.drivers.choose(&mut rand::thread_rng()).unwrap()
    }
}
