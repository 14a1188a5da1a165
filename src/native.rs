//! Binding to the NLPIR/ICTCLAS dynamic library.
//!
//! The library keeps one global session: `NLPIR_Init` opens it, `NLPIR_Exit`
//! closes it, and result strings live in an engine-owned buffer that the next
//! call overwrites. [`NlpirLibrary`] allows one open session per process,
//! serialises calls, and copies each result before releasing the lock.

use std::env;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_uint};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use encoding_rs::{DecoderResult, Encoding, BIG5, GBK, UTF_8};
use libloading::Library;

use crate::engine::Engine;
use crate::error::{NlpirError, Result};
use crate::format::{format_keywords, Keyword};
use crate::license;

static SESSION_OPEN: AtomicBool = AtomicBool::new(false);

/// Text encodings NLPIR accepts, with the codes `NLPIR_Init` expects.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineEncoding {
    Gbk = 0,
    #[default]
    Utf8 = 1,
    Big5 = 2,
}

impl EngineEncoding {
    #[inline]
    pub fn code(self) -> c_int {
        self as c_int
    }

    pub fn from_ffi(v: c_int) -> Option<Self> {
        Some(match v {
            0 => Self::Gbk,
            1 => Self::Utf8,
            2 => Self::Big5,
            _ => return None,
        })
    }

    fn encoding(self) -> &'static Encoding {
        match self {
            EngineEncoding::Gbk => GBK,
            EngineEncoding::Utf8 => UTF_8,
            EngineEncoding::Big5 => BIG5,
        }
    }
}

impl TryFrom<&str> for EngineEncoding {
    type Error = NlpirError;

    fn try_from(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf_8" | "utf-8" | "u8" | "utf" | "utf8" => Ok(Self::Utf8),
            "gbk" | "936" | "cp936" | "ms936" => Ok(Self::Gbk),
            "big5" | "big5-tw" | "csbig5" => Ok(Self::Big5),
            _ => Err(NlpirError::InvalidArgument(format!(
                "encoding must be one of 'utf_8', 'big5', or 'gbk'; not '{s}'"
            ))),
        }
    }
}

/// What to do with text the engine encoding cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingErrors {
    /// Fail the call.
    #[default]
    Strict,
    /// Drop the offending characters.
    Ignore,
    /// Substitute `?` when encoding and U+FFFD when decoding.
    Replace,
}

impl TryFrom<&str> for EncodingErrors {
    type Error = NlpirError;

    fn try_from(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "ignore" => Ok(Self::Ignore),
            "replace" => Ok(Self::Replace),
            _ => Err(NlpirError::InvalidArgument(format!(
                "encoding_errors must be one of 'strict', 'ignore', or 'replace'; not '{s}'"
            ))),
        }
    }
}

/// The part of speech tag sets NLPIR can emit.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PosTagSet {
    /// ICTCLAS second-level tags, the tag set [`ICTPOS`](crate::pos_map::ICTPOS) describes.
    #[default]
    Ict2 = 0,
    Ict1 = 1,
    Pku2 = 2,
    Pku1 = 3,
}

impl PosTagSet {
    pub fn from_ffi(v: c_int) -> Option<Self> {
        Some(match v {
            0 => Self::Ict2,
            1 => Self::Ict1,
            2 => Self::Pku2,
            3 => Self::Pku1,
            _ => return None,
        })
    }
}

impl TryFrom<&str> for PosTagSet {
    type Error = NlpirError;

    /// Accepts `ict2`, `ict1`, `pku2` and `pku1`, ignoring case, `_` and `-`.
    fn try_from(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "ict2" => Ok(Self::Ict2),
            "ict1" => Ok(Self::Ict1),
            "pku2" => Ok(Self::Pku2),
            "pku1" => Ok(Self::Pku1),
            _ => Err(NlpirError::InvalidArgument(format!(
                "POS map '{s}' not supported by NLPIR"
            ))),
        }
    }
}

/// Settings for [`NlpirLibrary::open`].
#[derive(Debug, Clone)]
pub struct NlpirOptions {
    /// Directory holding the platform library file.
    pub lib_dir: PathBuf,
    /// Directory holding NLPIR's `Data` directory.
    pub data_dir: PathBuf,
    pub encoding: EngineEncoding,
    pub encoding_errors: EncodingErrors,
    /// Commercial license code; empty for the public license file.
    pub license_code: Option<String>,
    /// Tag set to switch to after initialisation.
    pub pos_tag_set: Option<PosTagSet>,
}

impl Default for NlpirOptions {
    fn default() -> Self {
        NlpirOptions {
            lib_dir: PathBuf::from("lib"),
            data_dir: PathBuf::from("."),
            encoding: EngineEncoding::default(),
            encoding_errors: EncodingErrors::default(),
            license_code: None,
            pos_tag_set: None,
        }
    }
}

impl NlpirOptions {
    /// Defaults, with `NLPIR_LIBRARY_DIR` and `NLPIR_DATA_DIR` taking
    /// precedence when set.
    pub fn from_env() -> Self {
        let mut options = NlpirOptions::default();
        if let Some(dir) = env::var_os("NLPIR_LIBRARY_DIR") {
            options.lib_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env::var_os("NLPIR_DATA_DIR") {
            options.data_dir = PathBuf::from(dir);
        }
        options
    }

    pub fn with_encoding(mut self, encoding: EngineEncoding, errors: EncodingErrors) -> Self {
        self.encoding = encoding;
        self.encoding_errors = errors;
        self
    }

    pub fn library_path(&self) -> Result<PathBuf> {
        Ok(self.lib_dir.join(library_file_name()?))
    }
}

/// The NLPIR library file built for this platform and pointer width.
pub fn library_file_name() -> Result<&'static str> {
    let is_64bit = cfg!(target_pointer_width = "64");
    if cfg!(target_os = "windows") {
        Ok(if is_64bit { "NLPIR64.dll" } else { "NLPIR32.dll" })
    } else if cfg!(target_os = "linux") {
        Ok(if is_64bit {
            "libNLPIR64.so"
        } else {
            "libNLPIR32.so"
        })
    } else {
        Err(NlpirError::UnsupportedPlatform(env::consts::OS.to_string()))
    }
}

type InitFn = unsafe extern "C" fn(*const c_char, c_int, *const c_char) -> c_int;
type ExitFn = unsafe extern "C" fn() -> bool;
type ParagraphProcessFn = unsafe extern "C" fn(*const c_char, c_int) -> *const c_char;
type KeyWordsFn = unsafe extern "C" fn(*const c_char, c_int, bool) -> *const c_char;
type SetPosMapFn = unsafe extern "C" fn(c_int) -> c_int;
type AddUserWordFn = unsafe extern "C" fn(*const c_char) -> c_uint;
type ImportUserDictFn = unsafe extern "C" fn(*const c_char, bool) -> c_uint;
type LastErrorFn = unsafe extern "C" fn() -> *const c_char;

struct NlpirApi {
    init: InitFn,
    exit: ExitFn,
    paragraph_process: ParagraphProcessFn,
    get_key_words: KeyWordsFn,
    get_new_words: KeyWordsFn,
    set_pos_map: SetPosMapFn,
    add_user_word: AddUserWordFn,
    import_user_dict: ImportUserDictFn,
    // Missing from some NLPIR releases.
    last_error_msg: Option<LastErrorFn>,
}

impl NlpirApi {
    fn load(library: &Library, path: &Path) -> Result<Self> {
        unsafe {
            Ok(NlpirApi {
                init: symbol(library, path, b"NLPIR_Init\0")?,
                exit: symbol(library, path, b"NLPIR_Exit\0")?,
                paragraph_process: symbol(library, path, b"NLPIR_ParagraphProcess\0")?,
                get_key_words: symbol(library, path, b"NLPIR_GetKeyWords\0")?,
                get_new_words: symbol(library, path, b"NLPIR_GetNewWords\0")?,
                set_pos_map: symbol(library, path, b"NLPIR_SetPOSmap\0")?,
                add_user_word: symbol(library, path, b"NLPIR_AddUserWord\0")?,
                import_user_dict: symbol(library, path, b"NLPIR_ImportUserDict\0")?,
                last_error_msg: symbol(library, path, b"NLPIR_GetLastErrorMsg\0").ok(),
            })
        }
    }
}

unsafe fn symbol<T: Copy>(library: &Library, path: &Path, name: &[u8]) -> Result<T> {
    tracing::debug!(
        "Getting NLPIR API function '{}'.",
        String::from_utf8_lossy(&name[..name.len() - 1])
    );
    let sym = library
        .get::<T>(name)
        .map_err(|e| NlpirError::LibraryLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(*sym)
}

/// An open NLPIR session.
///
/// Dropping it calls `NLPIR_Exit`.
pub struct NlpirLibrary {
    api: NlpirApi,
    encoding: EngineEncoding,
    encoding_errors: EncodingErrors,
    call_lock: Mutex<()>,
    open: bool,
    // Keeps the symbols in `api` valid.
    _library: Library,
}

impl NlpirLibrary {
    /// Loads the library for this platform and initialises the engine.
    ///
    /// Fails with [`NlpirError::License`] if NLPIR logged a missing or expired
    /// license, and [`NlpirError::AlreadyOpen`] if another session is open.
    pub fn open(options: &NlpirOptions) -> Result<Self> {
        let path = options.library_path()?;
        Self::open_with_path(&path, options)
    }

    /// Like [`open`](Self::open), with an explicit library file.
    pub fn open_with_path(path: &Path, options: &NlpirOptions) -> Result<Self> {
        if SESSION_OPEN
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(NlpirError::AlreadyOpen);
        }

        match Self::load_and_init(path, options) {
            Ok(library) => Ok(library),
            Err(e) => {
                SESSION_OPEN.store(false, Ordering::Release);
                Err(e)
            }
        }
    }

    fn load_and_init(path: &Path, options: &NlpirOptions) -> Result<Self> {
        tracing::info!("Loading the NLPIR library file.");
        tracing::debug!("Loading library file '{}'.", path.display());
        let library = unsafe { Library::new(path) }.map_err(|e| NlpirError::LibraryLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let api = NlpirApi::load(&library, path)?;
        tracing::debug!("Library file '{}' loaded.", path.display());

        let data_dir = options.data_dir.to_str().ok_or_else(|| {
            NlpirError::Encoding(format!(
                "data directory '{}' is not valid Unicode",
                options.data_dir.display()
            ))
        })?;
        let license_code = options.license_code.as_deref().unwrap_or("");
        tracing::debug!(
            "Initializing the NLPIR API: 'data_dir': '{}', 'encoding': '{:?}', 'license_code': '{}'",
            data_dir,
            options.encoding,
            license_code
        );

        let c_data_dir = to_c_string(data_dir, options.encoding, options.encoding_errors)?;
        let c_license = to_c_string(license_code, options.encoding, options.encoding_errors)?;
        let ok = unsafe {
            (api.init)(
                c_data_dir.as_ptr(),
                options.encoding.code(),
                c_license.as_ptr(),
            )
        };

        let mut library = NlpirLibrary {
            api,
            encoding: options.encoding,
            encoding_errors: options.encoding_errors,
            call_lock: Mutex::new(()),
            open: false,
            _library: library,
        };

        if ok == 0 {
            if let Ok(Some(status)) = license::check_error_log(&options.data_dir) {
                return Err(NlpirError::License(status.message().to_string()));
            }
            let detail = library
                .last_error_message()
                .unwrap_or_else(|| "check the NLPIR error log for more information".to_string());
            return Err(NlpirError::Init(detail));
        }
        library.open = true;
        tracing::info!("NLPIR API initialized.");

        if let Some(pos_tag_set) = options.pos_tag_set {
            if let Err(e) = library.set_pos_tag_set(pos_tag_set) {
                tracing::error!("{}", e);
            }
        }
        Ok(library)
    }

    pub fn encoding(&self) -> EngineEncoding {
        self.encoding
    }

    /// Exits the engine and frees its memory.
    pub fn close(self) {
        drop(self);
    }

    fn exit(&mut self) {
        if !self.open {
            return;
        }
        tracing::debug!("Exiting the NLPIR API.");
        let _guard = self.call_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if unsafe { (self.api.exit)() } {
            tracing::debug!("NLPIR API exited.");
        } else {
            tracing::warn!("NLPIR function 'NLPIR_Exit' failed.");
        }
        self.open = false;
        SESSION_OPEN.store(false, Ordering::Release);
    }

    /// Switches the tag set the engine emits.
    pub fn set_pos_tag_set(&self, pos_tag_set: PosTagSet) -> Result<()> {
        tracing::info!("Setting POS map to '{:?}'.", pos_tag_set);
        let _guard = self.call_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if unsafe { (self.api.set_pos_map)(pos_tag_set as c_int) } == 0 {
            return Err(NlpirError::Engine(format!(
                "unable to set POS map to '{pos_tag_set:?}'"
            )));
        }
        Ok(())
    }

    /// Adds a word to the user dictionary for this session, optionally with a
    /// part of speech code.
    pub fn add_user_word(&self, word: &str, pos: Option<&str>) -> Result<()> {
        let entry = match pos {
            Some(pos) => format!("{word} {pos}"),
            None => word.to_string(),
        };
        let c_entry = self.c_string(&entry)?;
        let _guard = self.call_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if unsafe { (self.api.add_user_word)(c_entry.as_ptr()) } == 0 {
            return Err(NlpirError::Engine(format!("unable to add user word '{word}'")));
        }
        Ok(())
    }

    /// Imports a user dictionary file, returning the number of words added.
    pub fn import_user_dict(&self, path: &Path, overwrite: bool) -> Result<u32> {
        let path_str = path.to_str().ok_or_else(|| {
            NlpirError::Encoding(format!("path '{}' is not valid Unicode", path.display()))
        })?;
        let c_path = self.c_string(path_str)?;
        let _guard = self.call_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let count = unsafe { (self.api.import_user_dict)(c_path.as_ptr(), overwrite) };
        Ok(count as u32)
    }

    /// Discovers up to `max_words` new words in `text`.
    pub fn get_new_words(&self, text: &str, max_words: usize, weighted: bool) -> Result<Vec<Keyword>> {
        let c_text = self.c_string(text)?;
        let _guard = self.call_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let ptr = unsafe { (self.api.get_new_words)(c_text.as_ptr(), c_limit(max_words), weighted) };
        let raw = self.take_result(ptr, "NLPIR_GetNewWords")?;
        Ok(format_keywords(&raw, weighted))
    }

    /// The engine's last error message, if this release exports one.
    pub fn last_error_message(&self) -> Option<String> {
        let last_error_msg = self.api.last_error_msg?;
        let _guard = self.call_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let ptr = unsafe { last_error_msg() };
        if ptr.is_null() {
            return None;
        }
        let bytes = unsafe { CStr::from_ptr(ptr) }.to_bytes();
        Some(decode_text(bytes, self.encoding, EncodingErrors::Replace).unwrap_or_default())
    }

    fn c_string(&self, text: &str) -> Result<CString> {
        to_c_string(text, self.encoding, self.encoding_errors)
    }

    // Must be called while holding `call_lock`: the buffer belongs to the engine.
    fn take_result(&self, ptr: *const c_char, function: &str) -> Result<String> {
        if ptr.is_null() {
            return Err(NlpirError::Engine(format!(
                "{function} returned a null pointer"
            )));
        }
        let bytes = unsafe { CStr::from_ptr(ptr) }.to_bytes();
        decode_text(bytes, self.encoding, self.encoding_errors)
    }
}

impl Engine for NlpirLibrary {
    fn paragraph_process(&self, text: &str, pos_tagging: bool) -> Result<String> {
        let c_text = self.c_string(text)?;
        let _guard = self.call_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let ptr = unsafe { (self.api.paragraph_process)(c_text.as_ptr(), pos_tagging as c_int) };
        self.take_result(ptr, "NLPIR_ParagraphProcess")
    }

    fn get_key_words(&self, text: &str, max_words: usize, weighted: bool) -> Result<String> {
        let c_text = self.c_string(text)?;
        let _guard = self.call_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let ptr = unsafe { (self.api.get_key_words)(c_text.as_ptr(), c_limit(max_words), weighted) };
        self.take_result(ptr, "NLPIR_GetKeyWords")
    }
}

impl Drop for NlpirLibrary {
    fn drop(&mut self) {
        self.exit();
    }
}

fn c_limit(max_words: usize) -> c_int {
    c_int::try_from(max_words).unwrap_or(c_int::MAX)
}

fn to_c_string(text: &str, encoding: EngineEncoding, errors: EncodingErrors) -> Result<CString> {
    let bytes = encode_text(text, encoding, errors)?;
    CString::new(bytes).map_err(|e| {
        NlpirError::Engine(format!(
            "input contains a NUL byte at position {}",
            e.nul_position()
        ))
    })
}

/// Encodes `text` for the engine.
pub fn encode_text(text: &str, encoding: EngineEncoding, errors: EncodingErrors) -> Result<Vec<u8>> {
    if encoding == EngineEncoding::Utf8 {
        return Ok(text.as_bytes().to_vec());
    }
    let target = encoding.encoding();
    if errors == EncodingErrors::Strict {
        let (bytes, _, had_errors) = target.encode(text);
        if had_errors {
            return Err(NlpirError::Encoding(format!(
                "text cannot be represented in {}",
                target.name()
            )));
        }
        return Ok(bytes.into_owned());
    }

    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        let (bytes, _, had_errors) = target.encode(ch.encode_utf8(&mut buf));
        if !had_errors {
            out.extend_from_slice(&bytes);
        } else if errors == EncodingErrors::Replace {
            out.push(b'?');
        }
    }
    Ok(out)
}

/// Decodes an engine result.
pub fn decode_text(bytes: &[u8], encoding: EngineEncoding, errors: EncodingErrors) -> Result<String> {
    let source = encoding.encoding();
    match errors {
        EncodingErrors::Strict => source
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
            .ok_or_else(|| {
                NlpirError::Encoding(format!("engine returned invalid {}", source.name()))
            }),
        EncodingErrors::Replace => Ok(source.decode_without_bom_handling(bytes).0.into_owned()),
        EncodingErrors::Ignore => Ok(decode_skipping_malformed(bytes, source)),
    }
}

// Malformed sequences are consumed by the decoder and left out of the output;
// U+FFFD present in the input survives.
fn decode_skipping_malformed(bytes: &[u8], source: &'static Encoding) -> String {
    let mut decoder = source.new_decoder_without_bom_handling();
    let mut text = String::with_capacity(
        decoder
            .max_utf8_buffer_length_without_replacement(bytes.len())
            .unwrap_or(bytes.len()),
    );
    let mut rest = bytes;
    loop {
        let (result, read) = decoder.decode_to_string_without_replacement(rest, &mut text, true);
        rest = &rest[read..];
        match result {
            DecoderResult::InputEmpty => return text,
            DecoderResult::Malformed(_, _) => {}
            DecoderResult::OutputFull => {
                let needed = decoder
                    .max_utf8_buffer_length_without_replacement(rest.len())
                    .unwrap_or(rest.len());
                text.reserve(needed.max(4));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_labels() {
        assert_eq!(EngineEncoding::try_from("UTF-8").unwrap(), EngineEncoding::Utf8);
        assert_eq!(EngineEncoding::try_from("cp936").unwrap(), EngineEncoding::Gbk);
        assert_eq!(EngineEncoding::try_from("big5-tw").unwrap(), EngineEncoding::Big5);
        assert!(EngineEncoding::try_from("latin1").is_err());
        assert_eq!(EngineEncoding::from_ffi(2), Some(EngineEncoding::Big5));
        assert_eq!(EngineEncoding::from_ffi(9), None);
    }

    #[test]
    fn encoding_error_labels() {
        assert_eq!(EncodingErrors::try_from("ignore").unwrap(), EncodingErrors::Ignore);
        assert!(EncodingErrors::try_from("surrogateescape").is_err());
    }

    #[test]
    fn pos_tag_set_labels() {
        assert_eq!(PosTagSet::try_from("ICT_2").unwrap(), PosTagSet::Ict2);
        assert_eq!(PosTagSet::try_from("pku-1").unwrap(), PosTagSet::Pku1);
        assert!(PosTagSet::try_from("ict3").is_err());
        assert_eq!(PosTagSet::from_ffi(1), Some(PosTagSet::Ict1));
    }

    #[test]
    #[cfg(all(target_os = "linux", target_pointer_width = "64"))]
    fn linux_64bit_library_name() {
        assert_eq!(library_file_name().unwrap(), "libNLPIR64.so");
    }

    #[test]
    fn gbk_round_trip() {
        let bytes = encode_text("我们", EngineEncoding::Gbk, EncodingErrors::Strict).unwrap();
        assert_eq!(bytes, vec![0xCE, 0xD2, 0xC3, 0xC7]);
        let text = decode_text(&bytes, EngineEncoding::Gbk, EncodingErrors::Strict).unwrap();
        assert_eq!(text, "我们");
    }

    #[test]
    fn unencodable_text_follows_error_policy() {
        let text = "我😀們";
        assert!(matches!(
            encode_text(text, EngineEncoding::Big5, EncodingErrors::Strict),
            Err(NlpirError::Encoding(_))
        ));
        let replaced = encode_text(text, EngineEncoding::Big5, EncodingErrors::Replace).unwrap();
        let ignored = encode_text(text, EngineEncoding::Big5, EncodingErrors::Ignore).unwrap();
        assert_eq!(replaced.len(), ignored.len() + 1);
        assert!(replaced.contains(&b'?'));
    }

    #[test]
    fn invalid_bytes_follow_error_policy() {
        let bytes = [b'a', 0xFF, b'b'];
        assert!(decode_text(&bytes, EngineEncoding::Utf8, EncodingErrors::Strict).is_err());
        assert_eq!(
            decode_text(&bytes, EngineEncoding::Utf8, EncodingErrors::Ignore).unwrap(),
            "ab"
        );
        assert_eq!(
            decode_text(&bytes, EngineEncoding::Utf8, EncodingErrors::Replace).unwrap(),
            "a\u{FFFD}b"
        );
    }

    #[test]
    fn ignore_keeps_replacement_characters_from_the_input() {
        let mut bytes = "a\u{FFFD}".as_bytes().to_vec();
        bytes.push(0xFF);
        bytes.extend_from_slice("b們".as_bytes());
        assert_eq!(
            decode_text(&bytes, EngineEncoding::Utf8, EncodingErrors::Ignore).unwrap(),
            "a\u{FFFD}b們"
        );

        // A GBK lead byte followed by an invalid trail byte.
        let bytes = [0xCE, 0xD2, 0x81, 0x20, b'x'];
        let text = decode_text(&bytes, EngineEncoding::Gbk, EncodingErrors::Ignore).unwrap();
        assert!(text.starts_with('我'));
        assert!(text.ends_with('x'));
        assert!(!text.contains(char::REPLACEMENT_CHARACTER));
    }

    #[test]
    fn missing_library_reports_path() {
        let options = NlpirOptions {
            lib_dir: PathBuf::from("/nonexistent/nlpir/lib"),
            ..NlpirOptions::default()
        };
        let path = PathBuf::from("/nonexistent/nlpir/lib/libNLPIR64.so");
        match NlpirLibrary::open_with_path(&path, &options) {
            Err(NlpirError::LibraryLoad { path: reported, .. }) => assert_eq!(reported, path),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("library should not load"),
        }
        // A failed open must not leave the session marked as open.
        assert!(!SESSION_OPEN.load(Ordering::Acquire));
    }
}
