//! SDES: the text-level cipher.
//!
//! Wires the parameters, the two substitution tables and a prime source
//! into encrypt/decrypt calls over text. Each call is self-contained: the
//! key and subkeys are regenerated from `(p, q)`, and the CBC chain value
//! lives only for the duration of the call.

use std::fmt;

use log::{debug, warn};

use crate::config::SdesConfig;
use crate::error::SdesError;
use crate::feistel::{self, FeistelNetwork};
use crate::modes::{self, BlockChain, Direction, Mode};
use crate::params::CipherParameters;
use crate::random::bbs::blum_blum_shub;
use crate::random::prime_source::{PrimeSource, PrimeTable, SievePrimes};
use crate::sbox::SBox;
use crate::utils::bits::BitString;
use crate::utils::converter::Encoding;
use crate::utils::text::{self, PositionMap};

/// Simplified DES cipher over B6-encoded text.
///
/// Text is processed two symbols (one block) at a time. Characters outside
/// the alphabet are passed through untouched at their original offsets,
/// and an odd number of symbols is completed with the pad symbol, which
/// decryption strips again.
///
/// # Examples
///
/// ```
/// use sdes::{Mode, Sdes};
///
/// let cipher = Sdes::new();
/// let secret = cipher.encrypt("OK", Mode::Ecb).unwrap();
/// assert_eq!(secret, "YN");
/// assert_eq!(cipher.decrypt(&secret, Mode::Ecb).unwrap(), "OK");
/// ```
pub struct Sdes {
    params: CipherParameters,
    sbox1: SBox,
    sbox2: SBox,
    primes: Box<dyn PrimeSource + Send + Sync>,
}

impl Default for Sdes {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sdes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sdes")
            .field("params", &self.params)
            .field("sbox1", &self.sbox1)
            .field("sbox2", &self.sbox2)
            .finish_non_exhaustive()
    }
}

impl Sdes {
    /// Creates a cipher with default parameters, the built-in tables and
    /// the computed prime sequence.
    pub fn new() -> Self {
        Sdes {
            params: CipherParameters::default(),
            sbox1: SBox::default_sbox1(),
            sbox2: SBox::default_sbox2(),
            primes: Box::new(SievePrimes::new()),
        }
    }

    /// Creates a cipher with default parameters and explicit components.
    ///
    /// # Errors
    /// Returns [`SdesError::EmptySBox`] if either table is empty.
    pub fn with_components(
        sbox1: SBox,
        sbox2: SBox,
        primes: Box<dyn PrimeSource + Send + Sync>,
    ) -> Result<Self, SdesError> {
        if sbox1.is_empty() || sbox2.is_empty() {
            return Err(SdesError::EmptySBox);
        }
        Ok(Sdes {
            params: CipherParameters::default(),
            sbox1,
            sbox2,
            primes,
        })
    }

    /// Builds a cipher from a configuration, starting from the defaults.
    ///
    /// Table and prime files named in the configuration are loaded; every
    /// parameter goes through its validated setter.
    ///
    /// # Errors
    /// Returns the first load or validation error encountered.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdes::config::SdesConfig;
    /// use sdes::{Mode, Sdes};
    ///
    /// let config = SdesConfig::from_json(r#"{"p": 11, "q": 19, "pad": "q"}"#).unwrap();
    /// let cipher = Sdes::from_config(&config).unwrap();
    /// assert_eq!(cipher.encrypt("OK", Mode::Ecb).unwrap(), "kX");
    /// ```
    pub fn from_config(config: &SdesConfig) -> Result<Self, SdesError> {
        let sbox1 = match &config.sbox1 {
            Some(path) => SBox::load(path)?,
            None => SBox::default_sbox1(),
        };
        let sbox2 = match &config.sbox2 {
            Some(path) => SBox::load(path)?,
            None => SBox::default_sbox2(),
        };
        let primes: Box<dyn PrimeSource + Send + Sync> = match &config.primes {
            Some(path) => Box::new(PrimeTable::load(path)?),
            None => Box::new(SievePrimes::new()),
        };
        let mut cipher = Self::with_components(sbox1, sbox2, primes)?;

        let params = &mut cipher.params;
        if let Some(encoding) = &config.encoding {
            params.set_encoding(encoding.parse::<Encoding>()?)?;
        }
        if let Some(block_size) = config.block_size {
            params.set_block_size(block_size)?;
        }
        if let Some(rounds) = config.rounds {
            params.set_rounds(rounds)?;
        }
        if let Some(p) = config.p {
            params.set_p(p)?;
        }
        if let Some(q) = config.q {
            params.set_q(q)?;
        }
        if let Some(pad) = config.pad {
            params.set_pad(pad)?;
        }
        debug!("sdes built from config: {:?}", cipher.params);
        Ok(cipher)
    }

    pub fn params(&self) -> &CipherParameters {
        &self.params
    }

    /// Mutable access to the parameters; every field setter validates.
    pub fn params_mut(&mut self) -> &mut CipherParameters {
        &mut self.params
    }

    pub fn sbox1(&self) -> &SBox {
        &self.sbox1
    }

    pub fn sbox2(&self) -> &SBox {
        &self.sbox2
    }

    /// Replaces the first substitution table.
    ///
    /// # Errors
    /// Returns [`SdesError::EmptySBox`] for an empty table.
    pub fn set_sbox1(&mut self, sbox: SBox) -> Result<(), SdesError> {
        if sbox.is_empty() {
            warn!("rejected sbox1: table is empty");
            return Err(SdesError::EmptySBox);
        }
        self.sbox1 = sbox;
        Ok(())
    }

    /// Replaces the second substitution table.
    ///
    /// # Errors
    /// Returns [`SdesError::EmptySBox`] for an empty table.
    pub fn set_sbox2(&mut self, sbox: SBox) -> Result<(), SdesError> {
        if sbox.is_empty() {
            warn!("rejected sbox2: table is empty");
            return Err(SdesError::EmptySBox);
        }
        self.sbox2 = sbox;
        Ok(())
    }

    /// Replaces the prime source used to seed the key generator.
    pub fn set_prime_source(&mut self, primes: Box<dyn PrimeSource + Send + Sync>) {
        self.primes = primes;
    }

    /// The `key_length`-bit key, regenerated from `(p, q)` on every call.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdes::Sdes;
    ///
    /// assert_eq!(Sdes::new().key().unwrap().to_string(), "100011001");
    /// ```
    pub fn key(&self) -> Result<BitString, SdesError> {
        let key = blum_blum_shub(
            self.params.p(),
            self.params.q(),
            self.params.key_length(),
            self.primes.as_ref(),
        )?;
        debug!(
            "key regenerated for p={} q={}",
            self.params.p(),
            self.params.q()
        );
        Ok(key)
    }

    /// Subkey of round `i` (1-based): `key_length - 1` bits read from the
    /// key starting at circular offset `i - 1`.
    ///
    /// # Errors
    /// Returns [`SdesError::InvalidSubkeyIndex`] for `i <= 0`.
    pub fn subkey(&self, i: i64) -> Result<BitString, SdesError> {
        let key = self.key()?;
        Self::subkey_of(&key, i)
    }

    fn subkey_of(key: &BitString, i: i64) -> Result<BitString, SdesError> {
        if i <= 0 {
            return Err(SdesError::InvalidSubkeyIndex(i));
        }
        let offset = ((i - 1) as u64 % key.len() as u64) as usize;
        key.rotate_left(offset).take(key.len() - 1)
    }

    /// Subkeys for rounds `1..=rounds`, from a single key generation.
    fn subkeys(&self) -> Result<Vec<BitString>, SdesError> {
        let key = self.key()?;
        (1..=i64::from(self.params.rounds()))
            .map(|i| Self::subkey_of(&key, i))
            .collect()
    }

    /// The CBC initialization vector for the current block size.
    pub fn iv(&self) -> Result<BitString, SdesError> {
        modes::initialization_vector(self.params.block_size())
    }

    /// See [`feistel::expand`].
    pub fn expand(&self, r: &BitString) -> Result<BitString, SdesError> {
        feistel::expand(r)
    }

    /// The round function over this cipher's tables.
    pub fn f(&self, ri: &BitString, ki: &BitString) -> Result<BitString, SdesError> {
        self.network().f(ri, ki)
    }

    /// One Feistel round over this cipher's tables.
    pub fn feistel(&self, block: &BitString, ki: &BitString) -> Result<BitString, SdesError> {
        self.network().round(block, ki)
    }

    /// Encrypts `text` in the given mode.
    ///
    /// # Errors
    /// Returns a key generation error for unusable `(p, q)` or a width error
    /// if the tables do not fit the block size.
    pub fn encrypt(&self, text: &str, mode: Mode) -> Result<String, SdesError> {
        debug!("encrypt {} chars in {}", text.chars().count(), mode);
        self.process(text, mode, Direction::Encrypt)
    }

    /// Decrypts `text` in the given mode and strips trailing pad symbols.
    ///
    /// A plaintext that genuinely ended in the pad symbol loses it.
    ///
    /// # Errors
    /// As for [`encrypt`](Self::encrypt).
    pub fn decrypt(&self, text: &str, mode: Mode) -> Result<String, SdesError> {
        debug!("decrypt {} chars in {}", text.chars().count(), mode);
        let plain = self.process(text, mode, Direction::Decrypt)?;
        Ok(plain.trim_end_matches(self.params.pad()).to_string())
    }

    fn network(&self) -> FeistelNetwork<'_> {
        FeistelNetwork::new(&self.sbox1, &self.sbox2)
    }

    fn process(&self, input: &str, mode: Mode, direction: Direction) -> Result<String, SdesError> {
        let encoding = self.params.encoding();
        let (symbols, positions) = self.preprocess(input);

        let blocks = symbols
            .chunks(2)
            .map(|pair| -> Result<BitString, SdesError> {
                encoding.encode(pair[0])?.concat(&encoding.encode(pair[1])?)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let subkeys = self.subkeys()?;
        let chain = BlockChain::new(self.network(), &subkeys);
        let processed = chain.process(mode, direction, &blocks, self.iv()?)?;

        let mut output = String::with_capacity(input.len() + 1);
        for block in &processed {
            for group in block.chunks(encoding.symbol_width())? {
                output.push(encoding.decode(&group)?);
            }
        }
        Ok(text::insert_positions(&output, &positions))
    }

    /// Lifts out foreign characters and pads to an even symbol count.
    fn preprocess(&self, input: &str) -> (Vec<char>, PositionMap) {
        let encoding = self.params.encoding();
        let foreign: String = input.chars().filter(|c| !encoding.contains(*c)).collect();
        let positions = text::get_positions(input, &foreign);
        let mut symbols: Vec<char> = text::clean_text(input, &foreign).chars().collect();
        if !symbols.len().is_multiple_of(2) {
            symbols.push(self.params.pad());
        }
        (symbols, positions)
    }
}
