pub mod wav;

pub use wav::{encode_wav, encode_wav_with_format, PcmFormat, WAV_HEADER_LEN};
