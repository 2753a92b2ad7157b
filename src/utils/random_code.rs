//! 访问码生成
//!
//! 纯生成逻辑，不做任何 I/O；唯一性由数据库唯一索引与存储层的重试保证。

use rand::Rng;

/// 访问码字符集：32 个符号，排除易誊写混淆的 0、O、1、I、L
pub const ACCESS_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// 访问码长度
pub const ACCESS_CODE_LENGTH: usize = 6;

/// 生成一个 6 位访问码
///
/// 线程本地 RNG（ChaCha 实现，密码学安全）从字符集均匀采样。
pub fn generate_access_code() -> String {
    let mut rng = rand::rng();
    (0..ACCESS_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..ACCESS_CODE_ALPHABET.len());
            ACCESS_CODE_ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length() {
        for _ in 0..100 {
            assert_eq!(generate_access_code().len(), ACCESS_CODE_LENGTH);
        }
    }

    #[test]
    fn test_code_alphabet() {
        for _ in 0..100 {
            let code = generate_access_code();
            assert!(
                code.bytes().all(|b| ACCESS_CODE_ALPHABET.contains(&b)),
                "unexpected character in code: {code}"
            );
        }
    }

    #[test]
    fn test_code_excludes_ambiguous_characters() {
        for ambiguous in [b'0', b'O', b'1', b'I', b'L'] {
            assert!(!ACCESS_CODE_ALPHABET.contains(&ambiguous));
        }
        assert_eq!(ACCESS_CODE_ALPHABET.len(), 32);
    }

    #[test]
    fn test_code_matches_expected_shape() {
        let re = regex::Regex::new(r"^[ABCDEFGHJKLMNPQRSTUVWXYZ23456789]{6}$").unwrap();
        for _ in 0..100 {
            assert!(re.is_match(&generate_access_code()));
        }
    }
}
