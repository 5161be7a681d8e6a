use regex::Regex;

/// dbSNP reference-SNP identifier
pub const DBSNP_RSID_PATTERN: &str = r"^rs[0-9]*$";

/// Amino-acid position in a short protein change, e.g. `p.R175H` or `p.Arg175His`
pub const PROTEIN_POSITION_PATTERN: &str = r"p\.[A-Za-z]+([0-9]+)";

/// A nucleotide string (matched against the uppercased allele)
pub const VALID_NUCLEOTIDES_PATTERN: &str = r"^[ATGC]*$";

/// Compiled patterns shared by the resolvers
///
/// Built once per annotator and passed by reference, so resolution never
/// touches process-wide state.
#[derive(Debug, Clone)]
pub struct ResolverPatterns {
    pub dbsnp_rsid: Regex,
    pub protein_position: Regex,
    pub valid_nucleotides: Regex,
}

impl ResolverPatterns {
    /// Compile the resolver patterns
    ///
    /// # Errors
    ///
    /// Returns `regex::Error` if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            dbsnp_rsid: Regex::new(DBSNP_RSID_PATTERN)?,
            protein_position: Regex::new(PROTEIN_POSITION_PATTERN)?,
            valid_nucleotides: Regex::new(VALID_NUCLEOTIDES_PATTERN)?,
        })
    }

    /// True if `allele` consists only of A, T, G and C (any case)
    #[must_use]
    pub fn is_nucleotide_string(&self, allele: &str) -> bool {
        let upper = allele.to_ascii_uppercase();
        self.valid_nucleotides.is_match(&upper)
    }

    #[must_use]
    pub fn is_rsid(&self, id: &str) -> bool {
        self.dbsnp_rsid.is_match(id)
    }

    /// Leading amino-acid position of a short protein change, if any digits follow the residue
    #[must_use]
    pub fn protein_position<'a>(&self, hgvsp_short: &'a str) -> Option<&'a str> {
        self.protein_position
            .captures(hgvsp_short)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|digits| !digits.is_empty())
    }
}
