use crate::{Locus, LocusResolution, LOCUS_TOKEN_REGEX};
use lazy_static::lazy_static;
use regex::Regex;
use std::convert::TryFrom;
use std::fmt::{Display, Error, Formatter};

lazy_static! {
    static ref DOMAIN_SUBDOMAIN_RESIDUE: Regex =
        Regex::new(r"^(?P<d>[\w:]+)/(?P<s>[\w:]+)\((?P<r>[\w:]+)\)$").unwrap();
    static ref DOMAIN_RESIDUE: Regex = Regex::new(r"^(?P<d>[\w:]+)\((?P<r>[\w:]+)\)$").unwrap();
    static ref DOMAIN_SUBDOMAIN: Regex = Regex::new(r"^(?P<d>[\w:]+)/(?P<s>[\w:]+)$").unwrap();
    static ref RESIDUE: Regex = Regex::new(r"^\((?P<r>[\w:]+)\)$").unwrap();
    static ref DOMAIN: Regex = Regex::new(r"^(?P<d>[\w:]+)$").unwrap();
}

impl Locus {
    /// Create a new `Locus`, validating every populated token.
    ///
    /// Returns `Err` if some token is malformed or if a subdomain is given without a domain.
    pub fn new(
        domain: Option<&str>,
        subdomain: Option<&str>,
        residue: Option<&str>,
    ) -> Result<Locus, String> {
        for token in [domain, subdomain, residue].iter().flatten() {
            if !LOCUS_TOKEN_REGEX.is_match(token) {
                return Err(format!("Invalid locus token `{}`.", token));
            }
        }
        if subdomain.is_some() && domain.is_none() {
            return Err(format!(
                "Subdomain `{}` requires a domain.",
                subdomain.unwrap_or_default()
            ));
        }
        Ok(Locus {
            domain: domain.map(|it| it.to_string()),
            subdomain: subdomain.map(|it| it.to_string()),
            residue: residue.map(|it| it.to_string()),
        })
    }

    /// A locus addressing the whole molecule.
    pub fn empty() -> Locus {
        Locus::default()
    }

    /// Shorthand for a locus with just a domain.
    pub fn domain(domain: &str) -> Result<Locus, String> {
        Locus::new(Some(domain), None, None)
    }

    /// Shorthand for a locus with just a residue.
    pub fn residue(residue: &str) -> Result<Locus, String> {
        Locus::new(None, None, Some(residue))
    }

    pub fn get_domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn get_subdomain(&self) -> Option<&str> {
        self.subdomain.as_deref()
    }

    pub fn get_residue(&self) -> Option<&str> {
        self.residue.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_none() && self.subdomain.is_none() && self.residue.is_none()
    }

    /// The resolution implied by the populated fields. A residue always wins.
    pub fn resolution(&self) -> LocusResolution {
        if self.residue.is_some() {
            LocusResolution::Residue
        } else if self.subdomain.is_some() {
            LocusResolution::Subdomain
        } else if self.domain.is_some() {
            LocusResolution::Domain
        } else {
            LocusResolution::Component
        }
    }

    /// True if every field populated in `other` is populated with the same value in `self`,
    /// i.e. `self` addresses a (non-strict) part of `other`.
    pub fn is_sublocus_of(&self, other: &Locus) -> bool {
        fn field_ok(mine: &Option<String>, theirs: &Option<String>) -> bool {
            match (mine, theirs) {
                (Some(mine), Some(theirs)) => mine == theirs,
                (None, Some(_)) => false,
                (_, None) => true,
            }
        }
        field_ok(&self.domain, &other.domain)
            && field_ok(&self.subdomain, &other.subdomain)
            && field_ok(&self.residue, &other.residue)
    }

    /// Two loci overlap when one addresses a part of the other. The empty locus (the whole
    /// molecule) only overlaps with itself: a component-level reference does not occupy
    /// any particular site.
    pub fn overlaps_with(&self, other: &Locus) -> bool {
        if self.is_empty() || other.is_empty() {
            return self == other;
        }
        self.is_sublocus_of(other) || other.is_sublocus_of(self)
    }
}

impl TryFrom<&str> for Locus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Locus::empty());
        }
        if let Some(c) = DOMAIN_SUBDOMAIN_RESIDUE.captures(value) {
            Locus::new(Some(&c["d"]), Some(&c["s"]), Some(&c["r"]))
        } else if let Some(c) = DOMAIN_RESIDUE.captures(value) {
            Locus::new(Some(&c["d"]), None, Some(&c["r"]))
        } else if let Some(c) = DOMAIN_SUBDOMAIN.captures(value) {
            Locus::new(Some(&c["d"]), Some(&c["s"]), None)
        } else if let Some(c) = RESIDUE.captures(value) {
            Locus::new(None, None, Some(&c["r"]))
        } else if let Some(c) = DOMAIN.captures(value) {
            Locus::new(Some(&c["d"]), None, None)
        } else {
            Err(format!("Could not parse locus string `{}`.", value))
        }
    }
}

impl Display for Locus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match (&self.domain, &self.subdomain, &self.residue) {
            (Some(d), Some(s), Some(r)) => write!(f, "{}/{}({})", d, s, r),
            (Some(d), Some(s), None) => write!(f, "{}/{}", d, s),
            (Some(d), None, Some(r)) => write!(f, "{}({})", d, r),
            (Some(d), None, None) => write!(f, "{}", d),
            (None, _, Some(r)) => write!(f, "({})", r),
            (None, _, None) => Ok(()),
        }
    }
}
