use core::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use postcard::{
    from_bytes_cobs,
    ser_flavors::{Cobs, Slice},
    serialize_with_flavor,
};

pub const SERIALIZE_BUFFER_SIZE: usize = 128;

pub trait DataPointLogger<T> {
    fn log_data_point(&mut self, data_point: &T);
    fn get_bytes_logged(&self) -> u32;
    fn set_logging_enabled(&mut self, enabled: bool);
}

/// Length-prefixed COBS records written into two ping-pong pages. Whenever a
/// page fills up the logger switches to the other one and hands the full page
/// to `full_page_callback` (serial port, flash, ...).
pub struct PagedDataLogger<'a, T, F, const PAGE_SIZE: usize> {
    pages: [&'a mut [u8; PAGE_SIZE]; 2],
    active_page: usize,
    active_page_index: usize,
    logging_enabled: bool,
    bytes_logged: u32,
    dropped_data_points: u32,
    full_page_callback: Option<F>,
    _marker: PhantomData<T>,
}

impl<'a, T, F, const PAGE_SIZE: usize> DataPointLogger<T> for PagedDataLogger<'a, T, F, PAGE_SIZE>
where
    T: Serialize + DeserializeOwned,
    F: Fn(&[u8; PAGE_SIZE]),
{
    fn log_data_point(&mut self, data_point: &T) {
        if !self.logging_enabled {
            return;
        }

        let mut data_buffer = [0u8; SERIALIZE_BUFFER_SIZE];
        let serialized_size = match Self::serialize_data_point(data_point, &mut data_buffer) {
            // The length prefix is a single byte
            Some(size) if size <= u8::MAX as usize => size,
            _ => {
                self.dropped_data_points += 1;
                return;
            }
        };

        self.bytes_logged = self.bytes_logged.wrapping_add((serialized_size + 1) as u32);

        self.put_byte(serialized_size as u8);
        for byte in &data_buffer[0..serialized_size] {
            self.put_byte(*byte);
        }
    }

    fn get_bytes_logged(&self) -> u32 {
        self.bytes_logged
    }

    fn set_logging_enabled(&mut self, enabled: bool) {
        self.logging_enabled = enabled;
    }
}

impl<'a, T, F, const PAGE_SIZE: usize> PagedDataLogger<'a, T, F, PAGE_SIZE>
where
    T: Serialize + DeserializeOwned,
    F: Fn(&[u8; PAGE_SIZE]),
{
    pub fn new(
        page0: &'a mut [u8; PAGE_SIZE],
        page1: &'a mut [u8; PAGE_SIZE],
        full_page_callback: Option<F>,
    ) -> Self {
        Self {
            pages: [page0, page1],
            active_page: 0,
            active_page_index: 0,
            logging_enabled: false,
            bytes_logged: 0,
            dropped_data_points: 0,
            full_page_callback,
            _marker: PhantomData,
        }
    }

    pub fn retrieve_data_point(&self, buffer: &mut dyn Iterator<Item = &u8>) -> Option<T> {
        let size = (*buffer.next()?) as usize;
        let mut working_buffer = [0u8; SERIALIZE_BUFFER_SIZE];

        for byte in working_buffer.iter_mut().take(size) {
            *byte = *buffer.next()?;
        }

        Self::deserialize_data_point(&mut working_buffer[0..size])
    }

    /// The filled part of the page currently being written.
    pub fn active_page(&self) -> &[u8] {
        &self.pages[self.active_page][0..self.active_page_index]
    }

    pub fn dropped_data_points(&self) -> u32 {
        self.dropped_data_points
    }

    fn put_byte(&mut self, b: u8) {
        self.pages[self.active_page][self.active_page_index] = b;
        self.active_page_index += 1;

        if self.active_page_index >= PAGE_SIZE {
            let full_page = self.active_page;
            self.flip_page();

            if let Some(callback) = &self.full_page_callback {
                callback(&*self.pages[full_page]);
            }
        }
    }

    fn flip_page(&mut self) {
        self.active_page_index = 0;
        self.active_page = (self.active_page + 1) % 2;
    }

    fn serialize_data_point(data: &T, buffer: &mut [u8]) -> Option<usize> {
        let flavor = Cobs::try_new(Slice::new(buffer)).ok()?;

        serialize_with_flavor::<T, Cobs<Slice>, &mut [u8]>(data, flavor)
            .ok()
            .map(|output_buffer| output_buffer.len())
    }

    fn deserialize_data_point(buffer: &mut [u8]) -> Option<T> {
        from_bytes_cobs(buffer).ok()
    }
}

pub struct DataPointLoggerMock;

impl<T> DataPointLogger<T> for DataPointLoggerMock {
    fn log_data_point(&mut self, _data_point: &T) {}
    fn get_bytes_logged(&self) -> u32 { 0 }
    fn set_logging_enabled(&mut self, _enabled: bool) {}
}
