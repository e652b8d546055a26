//! The HTTP connector shared by the WebDriver client and the REST API client.
//!
//! `native-tls` (the default) and `rustls-tls` pick the TLS backend. With neither enabled, only
//! plain `http://` endpoints can be reached.

use hyper_util::client::legacy::connect::HttpConnector;
use std::io;

#[cfg(all(feature = "native-tls", not(feature = "rustls-tls")))]
pub(crate) type Connector = hyper_tls::HttpsConnector<HttpConnector>;

#[cfg(feature = "rustls-tls")]
pub(crate) type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

#[cfg(all(not(feature = "native-tls"), not(feature = "rustls-tls")))]
pub(crate) type Connector = HttpConnector;

#[cfg(all(feature = "native-tls", not(feature = "rustls-tls")))]
pub(crate) fn connector() -> io::Result<Connector> {
    Ok(hyper_tls::HttpsConnector::new())
}

#[cfg(feature = "rustls-tls")]
pub(crate) fn connector() -> io::Result<Connector> {
    Ok(hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build())
}

#[cfg(all(not(feature = "native-tls"), not(feature = "rustls-tls")))]
pub(crate) fn connector() -> io::Result<Connector> {
    Ok(HttpConnector::new())
}
