use std::fmt;
use std::iter;

/// Represents a kind of pieces.
///
/// The eight base kinds come first, followed by their promoted forms.
/// King and gold have no promoted form.
///
/// # Examples
///
/// ```
/// use shogi_kifu::PieceType;
///
/// assert_eq!(Some(PieceType::ProRook), PieceType::Rook.promote());
/// assert_eq!(None, PieceType::Gold.promote());
/// assert_eq!("龍", PieceType::ProRook.to_japanese());
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceType {
    King,
    Rook,
    Bishop,
    Gold,
    Silver,
    Knight,
    Lance,
    Pawn,
    ProRook,
    ProBishop,
    ProSilver,
    ProKnight,
    ProLance,
    ProPawn,
}

const ALL: [PieceType; 14] = [
    PieceType::King,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Gold,
    PieceType::Silver,
    PieceType::Knight,
    PieceType::Lance,
    PieceType::Pawn,
    PieceType::ProRook,
    PieceType::ProBishop,
    PieceType::ProSilver,
    PieceType::ProKnight,
    PieceType::ProLance,
    PieceType::ProPawn,
];

impl PieceType {
    /// Returns an iterator over all piece types, base kinds first.
    pub fn iter() -> PieceTypeIter {
        PieceTypeIter { current: 0 }
    }

    /// Returns an iterator over the eight unpromoted kinds in hand order (`K R B G S N L P`).
    pub fn base_kinds() -> impl Iterator<Item = PieceType> {
        PieceType::iter().filter(|pt| !pt.is_promoted())
    }

    /// Converts the instance into the unique number for array indexing purpose.
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Creates a new instance of `PieceType` from the lowercase SFEN letter.
    pub fn from_sfen(c: char) -> Option<PieceType> {
        Some(match c {
            'k' => PieceType::King,
            'r' => PieceType::Rook,
            'b' => PieceType::Bishop,
            'g' => PieceType::Gold,
            's' => PieceType::Silver,
            'n' => PieceType::Knight,
            'l' => PieceType::Lance,
            'p' => PieceType::Pawn,
            _ => return None,
        })
    }

    /// Returns `true` if this is one of the six promoted forms.
    pub fn is_promoted(self) -> bool {
        self.unpromote().is_some()
    }

    /// Returns `true` for an unpromoted kind that has a promoted form.
    pub fn can_promote(self) -> bool {
        self.promote().is_some()
    }

    /// Returns `true` if the kind can ever be promoted or demoted.
    ///
    /// King and gold are the only kinds that cannot.
    pub fn is_promotable_kind(self) -> bool {
        !matches!(self, PieceType::King | PieceType::Gold)
    }

    /// Returns the promoted form, or `None` if this kind is already promoted or never promotes.
    pub fn promote(self) -> Option<PieceType> {
        use self::PieceType::*;

        match self {
            Rook => Some(ProRook),
            Bishop => Some(ProBishop),
            Silver => Some(ProSilver),
            Knight => Some(ProKnight),
            Lance => Some(ProLance),
            Pawn => Some(ProPawn),
            _ => None,
        }
    }

    /// Returns the unpromoted form, or `None` if this kind is not a promoted form.
    pub fn unpromote(self) -> Option<PieceType> {
        use self::PieceType::*;

        match self {
            ProRook => Some(Rook),
            ProBishop => Some(Bishop),
            ProSilver => Some(Silver),
            ProKnight => Some(Knight),
            ProLance => Some(Lance),
            ProPawn => Some(Pawn),
            _ => None,
        }
    }

    /// Returns the base kind, stripping any promotion.
    pub fn base(self) -> PieceType {
        self.unpromote().unwrap_or(self)
    }

    /// Returns `true` if a piece of this kind can be kept in hand and dropped.
    pub fn is_hand_piece(self) -> bool {
        !self.is_promoted()
    }

    /// Returns the kanji used when a move of this kind is written in a record.
    pub fn to_japanese(self) -> &'static str {
        match self {
            PieceType::Pawn => "歩",
            PieceType::Lance => "香",
            PieceType::Knight => "桂",
            PieceType::Silver => "銀",
            PieceType::Gold => "金",
            PieceType::Bishop => "角",
            PieceType::Rook => "飛",
            PieceType::King => "玉",
            PieceType::ProPawn => "と",
            PieceType::ProLance => "成香",
            PieceType::ProKnight => "成桂",
            PieceType::ProSilver => "成銀",
            PieceType::ProBishop => "馬",
            PieceType::ProRook => "龍",
        }
    }

    /// Reads a piece glyph as written in KIF/Ki2 records.
    ///
    /// Accepts the single-character abbreviations (`杏`, `圭`, `全`) and the
    /// alternative glyphs (`王`, `竜`) as well.
    pub fn from_japanese(s: &str) -> Option<PieceType> {
        Some(match s {
            "歩" => PieceType::Pawn,
            "香" => PieceType::Lance,
            "桂" => PieceType::Knight,
            "銀" => PieceType::Silver,
            "金" => PieceType::Gold,
            "角" => PieceType::Bishop,
            "飛" => PieceType::Rook,
            "玉" | "王" => PieceType::King,
            "と" => PieceType::ProPawn,
            "杏" | "成香" => PieceType::ProLance,
            "圭" | "成桂" => PieceType::ProKnight,
            "全" | "成銀" => PieceType::ProSilver,
            "馬" => PieceType::ProBishop,
            "龍" | "竜" => PieceType::ProRook,
            _ => return None,
        })
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                PieceType::King => "k",
                PieceType::Rook => "r",
                PieceType::Bishop => "b",
                PieceType::Gold => "g",
                PieceType::Silver => "s",
                PieceType::Knight => "n",
                PieceType::Lance => "l",
                PieceType::Pawn => "p",
                PieceType::ProRook => "+r",
                PieceType::ProBishop => "+b",
                PieceType::ProSilver => "+s",
                PieceType::ProKnight => "+n",
                PieceType::ProLance => "+l",
                PieceType::ProPawn => "+p",
            }
        )
    }
}

/// This struct is created by the [`iter`] method on [`PieceType`].
///
/// [`iter`]: ./enum.PieceType.html#method.iter
/// [`PieceType`]: enum.PieceType.html
pub struct PieceTypeIter {
    current: usize,
}

impl iter::Iterator for PieceTypeIter {
    type Item = PieceType;

    fn next(&mut self) -> Option<Self::Item> {
        let pt = ALL.get(self.current).copied();
        if pt.is_some() {
            self.current += 1;
        }
        pt
    }
}
