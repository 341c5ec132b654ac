//! Static demo fixtures: the mock transaction ledger and the support FAQ
//! corpus. Both are process-wide immutable constants with indefinite
//! lifetime; no reload or invalidation exists.

use serde::Serialize;

/// A single ledger entry.
///
/// Amounts are whole yen; negative values are expenses, positive values
/// income. The fixture values are trusted as-is, but any future external
/// source should validate this shape at the boundary.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: &'static str,
    /// ISO-8601 date.
    pub date: &'static str,
    pub description: &'static str,
    pub amount: i64,
    pub category: &'static str,
}

/// Mock transaction history consumed read-only by the analyst agent.
pub const MOCK_TRANSACTIONS: [Transaction; 10] = [
    Transaction { id: "t1", date: "2024-05-01", description: "スターバックス コーヒー", amount: -550, category: "カフェ" },
    Transaction { id: "t2", date: "2024-05-02", description: "Uber Trip", amount: -2400, category: "交通費" },
    Transaction { id: "t3", date: "2024-05-03", description: "給与振込", amount: 350_000, category: "収入" },
    Transaction { id: "t4", date: "2024-05-05", description: "Amazon Japan", amount: -12_800, category: "ショッピング" },
    Transaction { id: "t5", date: "2024-05-06", description: "東京電力", amount: -8500, category: "光熱費" },
    Transaction { id: "t6", date: "2024-05-10", description: "Netflix 定額払い", amount: -1490, category: "エンタメ" },
    Transaction { id: "t7", date: "2024-05-12", description: "スーパー ライフ", amount: -4300, category: "食費" },
    Transaction { id: "t8", date: "2024-05-15", description: "エニタイムフィットネス", amount: -8000, category: "健康" },
    Transaction { id: "t9", date: "2024-05-20", description: "ユニクロ", amount: -5600, category: "被服費" },
    Transaction { id: "t10", date: "2024-05-25", description: "Apple Services", amount: -1300, category: "エンタメ" },
];

/// The support FAQ corpus embedded verbatim into the support agent's system
/// instruction as its only permissible knowledge source.
pub const SUPPORT_DOCS: &str = "\
[GENESIS APP よくある質問]
Q: パスワードをリセットするにはどうすればよいですか？
A: 設定 > セキュリティ > パスワードリセット から行えます。確認メールが送信されます。

Q: 振込限度額はいくらですか？
A: 1日の振込限度額は50万円です。それ以上の額をご希望の場合は、支店窓口までお越しください。

Q: カードをロックするにはどうすればよいですか？
A: 「カード」タブから「ロック」アイコンをタップすることで、即座にカードを凍結できます。

Q: ローンは提供していますか？
A: はい、金利2.5%から最大300万円までの個人向けローンを提供しています。「ローン」タブからお申し込みください。

Q: 支店の営業時間は？
A: 平日の午前9時から午後3時まで営業しています。ATMは24時間365日ご利用いただけます。
";
