use std::collections::HashMap;

use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

// Dicionário iGaming embutido: frases consagradas do domínio com as
// traduções usadas pelas operadoras. Serve o provider mock e qualquer
// lookup offline.
pub struct GlossaryTerm {
    pub phrase: &'static str,
    pub translations: &'static [(&'static str, &'static str)],
}

impl GlossaryTerm {
    pub fn translation(&self, lang: &str) -> Option<&'static str> {
        self.translations
            .iter()
            .find(|(code, _)| *code == lang)
            .map(|(_, text)| *text)
    }
}

pub static TERMS: &[GlossaryTerm] = &[
    GlossaryTerm {
        phrase: "Deposit",
        translations: &[
            ("cn", "充值"),
            ("kh", "ដាក់ប្រាក់"),
            ("id", "Setoran"),
            ("vn", "Gửi tiền"),
            ("th", "ฝากเงิน"),
            ("my", "Deposit"),
        ],
    },
    GlossaryTerm {
        phrase: "Withdraw",
        translations: &[
            ("cn", "提现"),
            ("kh", "ដកប្រាក់"),
            ("id", "Penarikan"),
            ("vn", "Rút tiền"),
            ("th", "ถอนเงิน"),
            ("my", "Pengeluaran"),
        ],
    },
    GlossaryTerm {
        phrase: "Spin",
        translations: &[
            ("cn", "旋转"),
            ("kh", "វិល"),
            ("id", "Putar"),
            ("vn", "Quay"),
            ("th", "หมุน"),
            ("my", "Putar"),
        ],
    },
    GlossaryTerm {
        phrase: "Bet",
        translations: &[
            ("cn", "投注"),
            ("kh", "ភ្នាល់"),
            ("id", "Taruhan"),
            ("vn", "Đặt cược"),
            ("th", "วางเดิมพัน"),
            ("my", "Pertaruhan"),
        ],
    },
    GlossaryTerm {
        phrase: "Balance",
        translations: &[
            ("cn", "余额"),
            ("kh", "សមតុល្យ"),
            ("id", "Saldo"),
            ("vn", "Số dư"),
            ("th", "ยอดคงเหลือ"),
            ("my", "Baki"),
        ],
    },
    GlossaryTerm {
        phrase: "Bonus",
        translations: &[
            ("cn", "奖金"),
            ("kh", "ប្រាក់រង្វាន់"),
            ("id", "Bonus"),
            ("vn", "Tiền thưởng"),
            ("th", "โบนัส"),
            ("my", "Bonus"),
        ],
    },
    GlossaryTerm {
        phrase: "Jackpot",
        translations: &[
            ("cn", "大奖"),
            ("kh", "ជែកផត"),
            ("id", "Jackpot"),
            ("vn", "Giải độc đắc"),
            ("th", "แจ็คพอต"),
            ("my", "Jackpot"),
        ],
    },
    GlossaryTerm {
        phrase: "Promotion",
        translations: &[
            ("cn", "优惠"),
            ("kh", "ការផ្សព្វផ្សាយ"),
            ("id", "Promosi"),
            ("vn", "Khuyến mãi"),
            ("th", "โปรโมชั่น"),
            ("my", "Promosi"),
        ],
    },
    GlossaryTerm {
        phrase: "Turnover",
        translations: &[
            ("cn", "流水"),
            ("kh", "ចរាចរណ៍សាច់ប្រាក់"),
            ("id", "Perputaran"),
            ("vn", "Doanh thu"),
            ("th", "ยอดเทิร์นโอเวอร์"),
            ("my", "Turnover"),
        ],
    },
    GlossaryTerm {
        phrase: "Rebate",
        translations: &[
            ("cn", "返水"),
            ("kh", "ការបង្វិលប្រាក់"),
            ("id", "Rabat"),
            ("vn", "Hoàn trả"),
            ("th", "คืนเงิน"),
            ("my", "Rebat"),
        ],
    },
    GlossaryTerm {
        phrase: "KYC Verification",
        translations: &[
            ("cn", "实名认证"),
            ("kh", "ការផ្ទៀងផ្ទាត់អត្តសញ្ញាណ"),
            ("id", "Verifikasi KYC"),
            ("vn", "Xác minh danh tính"),
            ("th", "การยืนยันตัวตน"),
            ("my", "Pengesahan KYC"),
        ],
    },
    GlossaryTerm {
        phrase: "Odds",
        translations: &[
            ("cn", "赔率"),
            ("kh", "ហាងឆេង"),
            ("id", "Peluang"),
            ("vn", "Tỷ lệ cược"),
            ("th", "อัตราต่อรอง"),
            ("my", "Odds"),
        ],
    },
    GlossaryTerm {
        phrase: "Login",
        translations: &[
            ("cn", "登录"),
            ("kh", "ចូល"),
            ("id", "Masuk"),
            ("vn", "Đăng nhập"),
            ("th", "เข้าสู่ระบบ"),
            ("my", "Log Masuk"),
        ],
    },
    GlossaryTerm {
        phrase: "Register",
        translations: &[
            ("cn", "注册"),
            ("kh", "ចុះឈ្មោះ"),
            ("id", "Daftar"),
            ("vn", "Đăng ký"),
            ("th", "ลงทะเบียน"),
            ("my", "Daftar"),
        ],
    },
    GlossaryTerm {
        phrase: "Confirm",
        translations: &[
            ("cn", "确认"),
            ("kh", "បញ្ជាក់"),
            ("id", "Konfirmasi"),
            ("vn", "Xác nhận"),
            ("th", "ยืนยัน"),
            ("my", "Sahkan"),
        ],
    },
    GlossaryTerm {
        phrase: "Insufficient Balance",
        translations: &[
            ("cn", "余额不足"),
            ("kh", "សមតុល្យមិនគ្រប់គ្រាន់"),
            ("id", "Saldo Tidak Cukup"),
            ("vn", "Số dư không đủ"),
            ("th", "ยอดเงินไม่เพียงพอ"),
            ("my", "Baki Tidak Mencukupi"),
        ],
    },
    GlossaryTerm {
        phrase: "Daily Mission",
        translations: &[
            ("cn", "每日任务"),
            ("kh", "បេសកកម្មប្រចាំថ្ងៃ"),
            ("id", "Misi Harian"),
            ("vn", "Nhiệm vụ hàng ngày"),
            ("th", "ภารกิจรายวัน"),
            ("my", "Misi Harian"),
        ],
    },
    GlossaryTerm {
        phrase: "VIP Level",
        translations: &[
            ("cn", "VIP等级"),
            ("kh", "កម្រិត VIP"),
            ("id", "Level VIP"),
            ("vn", "Cấp độ VIP"),
            ("th", "ระดับ VIP"),
            ("my", "Tahap VIP"),
        ],
    },
    GlossaryTerm {
        phrase: "Play Now",
        translations: &[
            ("cn", "立即开始"),
            ("kh", "លេងឥឡូវនេះ"),
            ("id", "Main Sekarang"),
            ("vn", "Chơi ngay"),
            ("th", "เล่นเลย"),
            ("my", "Main Sekarang"),
        ],
    },
    GlossaryTerm {
        phrase: "History",
        translations: &[
            ("cn", "记录"),
            ("kh", "ប្រវត្តិ"),
            ("id", "Riwayat"),
            ("vn", "Lịch sử"),
            ("th", "ประวัติ"),
            ("my", "Sejarah"),
        ],
    },
    GlossaryTerm {
        phrase: "Bank Card",
        translations: &[
            ("cn", "银行卡"),
            ("kh", "កាតធនាគារ"),
            ("id", "Kartu Bank"),
            ("vn", "Thẻ ngân hàng"),
            ("th", "บัตรธนาคาร"),
            ("my", "Kad Bank"),
        ],
    },
    GlossaryTerm {
        phrase: "Stake",
        translations: &[
            ("cn", "本金"),
            ("kh", "ប្រាក់ដើម"),
            ("id", "Taruhan Utama"),
            ("vn", "Tiền cược"),
            ("th", "เงินเดิมพัน"),
            ("my", "Stake"),
        ],
    },
];

// A ordem importa: a primeira categoria com keyword presente no texto vence.
pub static CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "BANKING",
        &["deposit", "withdraw", "balance", "bank", "wallet", "transfer", "pay", "card"],
    ),
    (
        "GAMES",
        &["spin", "play", "jackpot", "bet", "win", "slot", "dealer", "odds", "stake", "multiplier"],
    ),
    (
        "ACCOUNT",
        &["login", "register", "profile", "settings", "password", "kyc", "user", "verify"],
    ),
    (
        "PROMO",
        &["bonus", "promotion", "rebate", "mission", "event", "gift", "vip", "rewards", "turnover"],
    ),
    (
        "SYSTEM",
        &["error", "success", "confirm", "cancel", "loading", "network", "invalid"],
    ),
];

pub const DEFAULT_CATEGORY: &str = "COMMON";

pub fn normalize(text: &str) -> String {
    let mut s = text.trim().to_lowercase();

    s = s.split_whitespace().collect::<Vec<_>>().join(" ");

    for ch in ['“', '”', '’', '‘', '…', '"', '\'', '(', ')'] {
        s = s.replace(ch, "");
    }

    s
}

pub fn hash_norm(norm: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(norm.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

// Índice por hash da frase normalizada; resolve o caminho exato em O(1).
static INDEX: Lazy<HashMap<String, &'static GlossaryTerm>> = Lazy::new(|| {
    TERMS
        .iter()
        .map(|term| (hash_norm(&normalize(term.phrase)), term))
        .collect()
});

// Match exato (normalizado, via hash) primeiro; depois varredura por
// substring, como o serviço original fazia.
pub fn lookup(text: &str) -> Option<&'static GlossaryTerm> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let norm = normalize(trimmed);
    let h = hash_norm(&norm);
    if let Some(term) = INDEX.get(&h) {
        // hash confere, mas confirma a frase antes de aceitar
        if normalize(term.phrase) == norm {
            return Some(term);
        }
    }

    let lower = trimmed.to_lowercase();
    TERMS
        .iter()
        .find(|term| lower.contains(&term.phrase.to_lowercase()))
}

pub fn category_for(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return category;
        }
    }
    DEFAULT_CATEGORY
}
