pub(crate) mod fake_transport;

pub(crate) use fake_transport::FakeDriveTransport;
