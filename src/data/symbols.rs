//! Built-in formula → bookmark text mappings
//!
//! The default tier of the mapping table. Custom entries loaded from the
//! mapping file are layered on top of these and win on collision.
//!
//! Keys are the formula text exactly as it appears between `$` delimiters.

use phf::{phf_map, phf_ordered_map};

/// Default formula mappings, in lookup-priority order for the fallback renderer
pub static DEFAULT_MAPPINGS: phf::OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    // Greek letters (lowercase)
    "\\alpha" => "α",
    "\\beta" => "β",
    "\\gamma" => "γ",
    "\\delta" => "δ",
    "\\epsilon" => "ε",
    "\\varepsilon" => "ε",
    "\\zeta" => "ζ",
    "\\eta" => "η",
    "\\theta" => "θ",
    "\\vartheta" => "ϑ",
    "\\iota" => "ι",
    "\\kappa" => "κ",
    "\\lambda" => "λ",
    "\\mu" => "μ",
    "\\nu" => "ν",
    "\\xi" => "ξ",
    "\\pi" => "π",
    "\\varpi" => "ϖ",
    "\\rho" => "ρ",
    "\\varrho" => "ϱ",
    "\\sigma" => "σ",
    "\\varsigma" => "ς",
    "\\tau" => "τ",
    "\\upsilon" => "υ",
    "\\phi" => "φ",
    "\\varphi" => "φ",
    "\\chi" => "χ",
    "\\psi" => "ψ",
    "\\omega" => "ω",

    // Greek letters (uppercase)
    "\\Gamma" => "Γ",
    "\\Delta" => "Δ",
    "\\Theta" => "Θ",
    "\\Lambda" => "Λ",
    "\\Xi" => "Ξ",
    "\\Pi" => "Π",
    "\\Sigma" => "Σ",
    "\\Upsilon" => "Υ",
    "\\Phi" => "Φ",
    "\\Psi" => "Ψ",
    "\\Omega" => "Ω",

    // Binary operators
    "\\pm" => "±",
    "\\mp" => "∓",
    "\\times" => "×",
    "\\div" => "÷",
    "\\cdot" => "·",
    "\\ast" => "∗",
    "\\star" => "⋆",
    "\\circ" => "∘",
    "\\bullet" => "•",
    "\\cap" => "∩",
    "\\cup" => "∪",
    "\\sqcap" => "⊓",
    "\\sqcup" => "⊔",
    "\\vee" => "∨",
    "\\wedge" => "∧",
    "\\setminus" => "∖",
    "\\wr" => "≀",
    "\\diamond" => "⋄",
    "\\bigtriangleup" => "△",
    "\\bigtriangledown" => "▽",
    "\\triangleleft" => "◁",
    "\\triangleright" => "▷",
    "\\lhd" => "⊲",
    "\\rhd" => "⊳",
    "\\unlhd" => "⊴",
    "\\unrhd" => "⊵",
    "\\oplus" => "⊕",
    "\\ominus" => "⊖",
    "\\otimes" => "⊗",
    "\\oslash" => "⊘",
    "\\odot" => "⊙",
    "\\bigcirc" => "◯",
    "\\dagger" => "†",
    "\\ddagger" => "‡",
    "\\amalg" => "⨿",

    // Relations
    "\\leq" => "≤",
    "\\le" => "≤",
    "\\geq" => "≥",
    "\\ge" => "≥",
    "\\equiv" => "≡",
    "\\models" => "⊨",
    "\\prec" => "≺",
    "\\succ" => "≻",
    "\\sim" => "∼",
    "\\perp" => "⊥",
    "\\preceq" => "⪯",
    "\\succeq" => "⪰",
    "\\simeq" => "≃",
    "\\mid" => "∣",
    "\\ll" => "≪",
    "\\gg" => "≫",
    "\\asymp" => "≍",
    "\\parallel" => "∥",
    "\\subset" => "⊂",
    "\\supset" => "⊃",
    "\\approx" => "≈",
    "\\bowtie" => "⋈",
    "\\subseteq" => "⊆",
    "\\supseteq" => "⊇",
    "\\cong" => "≅",
    "\\sqsubset" => "⊏",
    "\\sqsupset" => "⊐",
    "\\neq" => "≠",
    "\\ne" => "≠",
    "\\smile" => "⌣",
    "\\sqsubseteq" => "⊑",
    "\\sqsupseteq" => "⊒",
    "\\doteq" => "≐",
    "\\frown" => "⌢",
    "\\in" => "∈",
    "\\ni" => "∋",
    "\\propto" => "∝",
    "\\vdash" => "⊢",
    "\\dashv" => "⊣",

    // Arrows
    "\\leftarrow" => "←",
    "\\gets" => "←",
    "\\rightarrow" => "→",
    "\\to" => "→",
    "\\leftrightarrow" => "↔",
    "\\uparrow" => "↑",
    "\\downarrow" => "↓",
    "\\updownarrow" => "↕",
    "\\Leftarrow" => "⇐",
    "\\Rightarrow" => "⇒",
    "\\Leftrightarrow" => "⇔",
    "\\Uparrow" => "⇑",
    "\\Downarrow" => "⇓",
    "\\Updownarrow" => "⇕",
    "\\mapsto" => "↦",
    "\\longmapsto" => "⟼",
    "\\hookleftarrow" => "↩",
    "\\hookrightarrow" => "↪",
    "\\leftharpoonup" => "↼",
    "\\leftharpoondown" => "↽",
    "\\rightharpoonup" => "⇀",
    "\\rightharpoondown" => "⇁",
    "\\rightleftharpoons" => "⇌",
    "\\iff" => "⟺",

    // Miscellaneous symbols
    "\\ldots" => "…",
    "\\cdots" => "⋯",
    "\\vdots" => "⋮",
    "\\ddots" => "⋱",
    "\\aleph" => "ℵ",
    "\\prime" => "′",
    "\\forall" => "∀",
    "\\exists" => "∃",
    "\\mho" => "℧",
    "\\partial" => "∂",
    "\\emptyset" => "∅",
    "\\infty" => "∞",
    "\\nabla" => "∇",
    "\\triangle" => "△",
    "\\Box" => "□",
    "\\Diamond" => "◊",
    "\\bot" => "⊥",
    "\\top" => "⊤",
    "\\angle" => "∠",
    "\\surd" => "√",
    "\\diamondsuit" => "♦",
    "\\heartsuit" => "♥",
    "\\clubsuit" => "♣",
    "\\spadesuit" => "♠",
    "\\neg" => "¬",
    "\\lnot" => "¬",
    "\\flat" => "♭",
    "\\natural" => "♮",
    "\\sharp" => "♯",

    // Large operators
    "\\sum" => "∑",
    "\\prod" => "∏",
    "\\coprod" => "∐",
    "\\int" => "∫",
    "\\oint" => "∮",
    "\\bigcap" => "⋂",
    "\\bigcup" => "⋃",
    "\\bigsqcup" => "⨆",
    "\\bigvee" => "⋁",
    "\\bigwedge" => "⋀",
    "\\bigodot" => "⨀",
    "\\bigotimes" => "⨂",
    "\\bigoplus" => "⨁",
    "\\biguplus" => "⨄",

    // Whole formulas with scripts
    "x^2" => "x²",
    "x^3" => "x³",
    "x^n" => "xⁿ",
    "x_i" => "xᵢ",
    "x_0" => "x₀",
    "x_1" => "x₁",
    "x_2" => "x₂",
    "x_n" => "xₙ",
    "a_i" => "aᵢ",
    "a_n" => "aₙ",
    "f(x)" => "f(x)",
    "g(x)" => "g(x)",
    "h(x)" => "h(x)",
    "F(x)" => "F(x)",
    "G(x)" => "G(x)",
    "H(x)" => "H(x)",

    // Sums, integrals, fractions, roots, powers
    "\\sum_{i=1}^n" => "∑ᵢ₌₁ⁿ",
    "\\sum_{i=0}^n" => "∑ᵢ₌₀ⁿ",
    "\\prod_{i=1}^n" => "∏ᵢ₌₁ⁿ",
    "\\int_0^\\infty" => "∫₀^∞",
    "\\int_{-\\infty}^\\infty" => "∫₋∞^∞",
    "\\int_a^b" => "∫ₐᵇ",
    "\\frac{1}{2}" => "½",
    "\\frac{1}{3}" => "⅓",
    "\\frac{2}{3}" => "⅔",
    "\\frac{1}{4}" => "¼",
    "\\frac{3}{4}" => "¾",
    "\\frac{1}{5}" => "⅕",
    "\\frac{1}{6}" => "⅙",
    "\\frac{1}{8}" => "⅛",
    "\\frac{a}{b}" => "a/b",
    "\\frac{x}{y}" => "x/y",
    "\\sqrt{x}" => "√x",
    "\\sqrt{2}" => "√2",
    "\\sqrt{3}" => "√3",
    "\\sqrt{n}" => "√n",
    "e^x" => "eˣ",
    "e^{-x}" => "e⁻ˣ",
    "e^{i\\pi}" => "e^(iπ)",
    "2^n" => "2ⁿ",
    "10^n" => "10ⁿ",

    // Trigonometric functions
    "\\sin x" => "sin x",
    "\\cos x" => "cos x",
    "\\tan x" => "tan x",
    "\\cot x" => "cot x",
    "\\sec x" => "sec x",
    "\\csc x" => "csc x",
    "\\arcsin x" => "arcsin x",
    "\\arccos x" => "arccos x",
    "\\arctan x" => "arctan x",
    "\\sinh x" => "sinh x",
    "\\cosh x" => "cosh x",
    "\\tanh x" => "tanh x",

    // Logarithms
    "\\log x" => "log x",
    "\\ln x" => "ln x",
    "\\log_2 x" => "log₂ x",
    "\\log_{10} x" => "log₁₀ x",
    "\\lg x" => "lg x",

    // Relations and set expressions between variables
    "A \\times B" => "A × B",
    "A \\cdot B" => "A · B",
    "a \\leq b" => "a ≤ b",
    "a \\geq b" => "a ≥ b",
    "a \\neq b" => "a ≠ b",
    "a \\approx b" => "a ≈ b",
    "a \\equiv b" => "a ≡ b",
    "a \\in B" => "a ∈ B",
    "a \\notin B" => "a ∉ B",
    "A \\subset B" => "A ⊂ B",
    "A \\supset B" => "A ⊃ B",
    "A \\subseteq B" => "A ⊆ B",
    "A \\supseteq B" => "A ⊇ B",
    "A \\cup B" => "A ∪ B",
    "A \\cap B" => "A ∩ B",
    "A \\setminus B" => "A ∖ B",
};

/// Unicode superscript forms used by the fallback renderer
pub static SUPERSCRIPTS: phf::Map<char, char> = phf_map! {
    '0' => '⁰', '1' => '¹', '2' => '²', '3' => '³', '4' => '⁴',
    '5' => '⁵', '6' => '⁶', '7' => '⁷', '8' => '⁸', '9' => '⁹',
    '+' => '⁺', '-' => '⁻', '=' => '⁼', '(' => '⁽', ')' => '⁾',
    'n' => 'ⁿ', 'i' => 'ⁱ', 'x' => 'ˣ',
};

/// Unicode subscript forms used by the fallback renderer
pub static SUBSCRIPTS: phf::Map<char, char> = phf_map! {
    '0' => '₀', '1' => '₁', '2' => '₂', '3' => '₃', '4' => '₄',
    '5' => '₅', '6' => '₆', '7' => '₇', '8' => '₈', '9' => '₉',
    '+' => '₊', '-' => '₋', '=' => '₌', '(' => '₍', ')' => '₎',
    'a' => 'ₐ', 'e' => 'ₑ', 'h' => 'ₕ', 'i' => 'ᵢ', 'j' => 'ⱼ',
    'k' => 'ₖ', 'l' => 'ₗ', 'm' => 'ₘ', 'n' => 'ₙ', 'o' => 'ₒ',
    'p' => 'ₚ', 'r' => 'ᵣ', 's' => 'ₛ', 't' => 'ₜ', 'u' => 'ᵤ',
    'v' => 'ᵥ', 'x' => 'ₓ',
};

/// Look up a formula in the default tier
#[inline]
pub fn lookup_default(formula: &str) -> Option<&'static str> {
    DEFAULT_MAPPINGS.get(formula).copied()
}

/// Map every character through `table`, keeping characters it has no form for
pub fn to_script(text: &str, table: &phf::Map<char, char>) -> String {
    text.chars()
        .map(|c| table.get(&c).copied().unwrap_or(c))
        .collect()
}
