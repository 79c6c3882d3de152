//! Encoding of a metadata graph into an element tree.
//!
//! The [`Encoder`] walks the graph depth first. Each class is written by
//! one method that visits the class properties in the order the dialect
//! declares them, so the same walk produces either dialect.

use crate::adapters::{append, code, measure, primitive, text};
use crate::config::CodecConfig;
use crate::dialect::{Dialect, DialectContext, Direction, Namespace};
use crate::error::Result;
use crate::identity::{Shared, WriteIdentities};
use crate::phase::Traversal;
use crate::terms::{Class, Term};
use crate::warning::{MessageKey, Warning, WarningListener, Warnings};
use isomd_metadata::{
    Citation, CitationDate, CodeList, ConstraintKind, Constraints, Contact, DataIdentification,
    DataQuality, Identifier, InternationalString, Lineage, Metadata, OnlineResource, Party,
    PartyKind, QualityElement, QualityResult, Resolution, Responsibility, Unit,
};
use isomd_xml_tree::{Document, Name, NodeId};
use std::collections::HashMap;
use std::sync::Arc;

/// ISO 19139 allows at most two results per quality element.
const LEGACY_MAX_RESULTS: usize = 2;

/// Character encoding declared by written locales.
const CHARACTER_ENCODING: &str = "utf8";

/// Writes one document. An encoder is used for a single call.
pub struct Encoder<'l> {
    ctx: DialectContext,
    prefer_unit_pointers: bool,
    doc: Document,
    identities: WriteIdentities,
    warnings: Warnings<'l>,
    traversal: Traversal,
    /// Units already defined inline, with the id of their definition.
    units: HashMap<Unit, String>,
}

impl<'l> Encoder<'l> {
    pub(crate) fn new(
        dialect: Dialect,
        config: &CodecConfig,
        listener: Option<&'l mut dyn WarningListener>,
    ) -> Self {
        Self {
            ctx: DialectContext::new(dialect, Direction::Writing),
            prefer_unit_pointers: config.prefer_unit_pointers,
            doc: Document::new(),
            identities: WriteIdentities::default(),
            warnings: Warnings::new(listener),
            traversal: Traversal::new(config.max_depth),
            units: HashMap::new(),
        }
    }

    /// Ends the call, returning the tree and the warnings found.
    pub(crate) fn finish(mut self, root: Result<NodeId>) -> Result<(Document, Vec<Warning>)> {
        let root = self.traversal.finish(root)?;
        tracing::trace!(
            phase = ?self.traversal.phase(),
            elements = self.doc.len(),
            "document written"
        );
        self.doc.set_root(root);
        Ok((self.doc, self.warnings.into_vec()))
    }

    pub(crate) fn encode_metadata(&mut self, metadata: &Metadata) -> Result<NodeId> {
        let root = self.root(Term::MdMetadata);
        self.nested(|e| e.metadata(root, metadata))?;
        Ok(root)
    }

    pub(crate) fn encode_citation(&mut self, citation: &Citation) -> Result<NodeId> {
        let root = self.root(Term::CiCitation);
        self.identities.place(citation, root, &mut self.doc);
        self.nested(|e| e.citation(root, citation))?;
        Ok(root)
    }

    fn root(&mut self, term: Term) -> NodeId {
        let name = self
            .ctx
            .element_name(term)
            .map(|name| name.to_name())
            .unwrap_or_else(|| Name::unqualified(term.label()));
        self.doc.create_element(name)
    }

    // Traversal helpers

    fn nested(&mut self, write: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        self.traversal.enter()?;
        let result = write(self);
        self.traversal.leave();
        result
    }

    fn order(&self, class: Class) -> &'static [Term] {
        self.ctx.property_order(class)
    }

    fn property(&mut self, parent: NodeId, term: Term) -> Option<NodeId> {
        append(&mut self.doc, &self.ctx, parent, term)
    }

    /// Writes a property holding an object of element `element`.
    fn object<F>(&mut self, parent: NodeId, term: Term, element: Term, write: F) -> Result<()>
    where
        F: FnOnce(&mut Self, NodeId) -> Result<()>,
    {
        let Some(prop) = self.property(parent, term) else {
            return Ok(());
        };
        let Some(node) = append(&mut self.doc, &self.ctx, prop, element) else {
            self.doc.retract(parent, prop);
            return Ok(());
        };
        self.nested(|e| write(e, node))
    }

    /// Writes a property holding a shared object: inline on first visit,
    /// as a reference to the first occurrence afterwards.
    fn shared<T, F>(&mut self, parent: NodeId, term: Term, value: &Arc<T>, write: F) -> Result<()>
    where
        T: Shared,
        F: FnOnce(&mut Self, NodeId, &T) -> Result<()>,
    {
        let Some(prop) = self.property(parent, term) else {
            return Ok(());
        };
        if let Some(id) = self.identities.reference(&**value, &mut self.doc) {
            self.doc.set_attribute(
                prop,
                Name::new(Namespace::Xlink.uri(), "href"),
                format!("#{}", id),
            );
            return Ok(());
        }
        let Some(element) = self.ctx.class_name(T::CLASS) else {
            self.doc.retract(parent, prop);
            return Ok(());
        };
        let node = self.doc.append(prop, element.to_name());
        self.identities.place(&**value, node, &mut self.doc);
        self.nested(|e| write(e, node, &**value))
    }

    // Values

    fn text(&mut self, parent: NodeId, term: Term, value: Option<&InternationalString>) {
        let Some(value) = value.filter(|value| !value.is_empty()) else {
            return;
        };
        if let Some(prop) = self.property(parent, term) {
            text::write(&mut self.doc, &self.ctx, prop, value);
        }
    }

    fn texts(&mut self, parent: NodeId, term: Term, values: &[InternationalString]) {
        for value in values {
            self.text(parent, term, Some(value));
        }
    }

    fn string(&mut self, parent: NodeId, term: Term, value: Option<&str>) {
        let Some(value) = value.filter(|value| !value.is_empty()) else {
            return;
        };
        if let Some(prop) = self.property(parent, term) {
            primitive::write_string(&mut self.doc, &self.ctx, prop, value);
        }
    }

    fn code<C: CodeList>(&mut self, parent: NodeId, term: Term, value: Option<C>) {
        let Some(value) = value else {
            return;
        };
        if let Some(prop) = self.property(parent, term) {
            code::write(&mut self.doc, &self.ctx, prop, value);
        }
    }

    fn truncated(&mut self, class: Class, term: Term) {
        self.warnings
            .emit(MessageKey::ValueTruncated, [class.name(), term.label()]);
    }

    fn not_representable(&mut self, class: Class, term: Term) {
        self.warnings
            .emit(MessageKey::PropertyNotRepresentable, [class.name(), term.label()]);
    }

    /// Warns when a present value has no element in this dialect.
    fn check_representable(&mut self, class: Class, term: Term, present: bool) {
        if present && self.ctx.element_name(term).is_none() {
            self.not_representable(class, term);
        }
    }

    // Classes

    fn metadata(&mut self, node: NodeId, metadata: &Metadata) -> Result<()> {
        for &term in self.order(Class::Metadata) {
            match term {
                Term::FileIdentifier => {
                    if let Some(identifier) = &metadata.metadata_identifier {
                        if identifier.authority.is_some()
                            || identifier.code_space.is_some()
                            || identifier.version.is_some()
                            || identifier.description.is_some()
                        {
                            self.truncated(Class::Metadata, Term::MetadataIdentifier);
                        }
                        self.string(node, term, Some(identifier.code.as_str()));
                    }
                }
                Term::MetadataIdentifier => {
                    if let Some(identifier) = &metadata.metadata_identifier {
                        self.identifier(node, term, identifier)?;
                    }
                }
                Term::Language => self.string(node, term, metadata.language.as_deref()),
                Term::DefaultLocale => {
                    if let Some(language) = &metadata.language {
                        self.locale(node, language)?;
                    }
                }
                Term::MetadataContact => {
                    for contact in &metadata.contacts {
                        self.shared(node, term, contact, Self::responsibility)?;
                    }
                }
                Term::DateStamp => {
                    if let Some((first, rest)) = metadata.date_info.split_first() {
                        if let Some(prop) = self.property(node, term) {
                            primitive::write_date(&mut self.doc, &self.ctx, prop, &first.date);
                        }
                        if !rest.is_empty() {
                            self.truncated(Class::Metadata, Term::DateInfo);
                        }
                    }
                }
                Term::DateInfo => {
                    for date in &metadata.date_info {
                        self.citation_date(node, term, date)?;
                    }
                }
                Term::MetadataStandardName => {
                    if let Some(standard) = metadata.metadata_standards.first() {
                        self.text(node, term, standard.title.as_ref());
                        if metadata.metadata_standards.len() > 1 {
                            self.truncated(Class::Metadata, Term::MetadataStandard);
                        }
                    }
                }
                Term::MetadataStandardVersion => {
                    if let Some(standard) = metadata.metadata_standards.first() {
                        self.text(node, term, standard.edition.as_ref());
                    }
                }
                Term::MetadataStandard => {
                    for standard in &metadata.metadata_standards {
                        self.shared(node, term, standard, Self::citation)?;
                    }
                }
                Term::IdentificationInfo => {
                    for identification in &metadata.identification_info {
                        self.object(node, term, Term::MdDataIdentification, |e, n| {
                            e.data_identification(n, identification)
                        })?;
                    }
                }
                Term::DataQualityInfo => self.data_quality_info(node, term, metadata)?,
                Term::ResourceLineage => {
                    for lineage in &metadata.resource_lineages {
                        self.object(node, term, Term::LiLineage, |e, n| e.lineage(n, lineage))?;
                    }
                }
                Term::MetadataConstraints => {
                    for constraints in &metadata.metadata_constraints {
                        self.constraints(node, term, constraints)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Quality blocks. ISO 19139 has no lineage at the root: each lineage
    /// is nested in a non-empty quality block, in order, and the remaining
    /// lineages get blocks of their own.
    fn data_quality_info(&mut self, node: NodeId, term: Term, metadata: &Metadata) -> Result<()> {
        if !self.ctx.is_legacy() {
            for quality in &metadata.data_quality_info {
                self.object(node, term, Term::DqDataQuality, |e, n| e.data_quality(n, quality, None))?;
            }
            return Ok(());
        }
        let mut lineages = metadata.resource_lineages.iter();
        for quality in &metadata.data_quality_info {
            let lineage = if quality.is_empty() {
                None
            } else {
                lineages.next()
            };
            self.object(node, term, Term::DqDataQuality, |e, n| {
                e.data_quality(n, quality, lineage)
            })?;
        }
        let empty = DataQuality::default();
        for lineage in lineages {
            self.object(node, term, Term::DqDataQuality, |e, n| {
                e.data_quality(n, &empty, Some(lineage))
            })?;
        }
        Ok(())
    }

    fn locale(&mut self, node: NodeId, language: &str) -> Result<()> {
        self.object(node, Term::DefaultLocale, Term::PtLocale, |e, locale| {
            for &term in e.order(Class::Locale) {
                let (value, list, value_term) = match term {
                    Term::LocaleLanguage => (language, "LanguageCode", Term::LanguageCode),
                    Term::CharacterEncoding => {
                        (CHARACTER_ENCODING, "MD_CharacterSetCode", Term::CharacterSetCode)
                    }
                    _ => continue,
                };
                let Some(prop) = e.property(locale, term) else {
                    continue;
                };
                if let Some(code) = append(&mut e.doc, &e.ctx, prop, value_term) {
                    let uri = e.ctx.code_list_uri_named(list);
                    e.doc.set_attribute(code, Name::unqualified("codeList"), uri);
                    e.doc.set_attribute(code, Name::unqualified("codeListValue"), value);
                }
            }
            Ok(())
        })
    }

    fn identifier(&mut self, parent: NodeId, term: Term, identifier: &Identifier) -> Result<()> {
        let element = if self.ctx.is_legacy()
            && (identifier.code_space.is_some() || identifier.version.is_some())
        {
            Term::RsIdentifier
        } else {
            Term::MdIdentifier
        };
        self.object(parent, term, element, |e, node| {
            for &term in e.order(Class::Identifier) {
                match term {
                    Term::Authority => {
                        if let Some(authority) = &identifier.authority {
                            e.shared(node, term, authority, Self::citation)?;
                        }
                    }
                    Term::Code => e.string(node, term, Some(identifier.code.as_str())),
                    Term::CodeSpace => e.string(node, term, identifier.code_space.as_deref()),
                    Term::Version => e.string(node, term, identifier.version.as_deref()),
                    Term::IdentifierDescription => {
                        e.text(node, term, identifier.description.as_ref())
                    }
                    _ => {}
                }
            }
            e.check_representable(
                Class::Identifier,
                Term::IdentifierDescription,
                identifier.description.is_some(),
            );
            Ok(())
        })
    }

    fn citation(&mut self, node: NodeId, citation: &Citation) -> Result<()> {
        for &term in self.order(Class::Citation) {
            match term {
                Term::Title => self.text(node, term, citation.title.as_ref()),
                Term::AlternateTitle => self.texts(node, term, &citation.alternate_titles),
                Term::CitationDate => {
                    for date in &citation.dates {
                        self.citation_date(node, term, date)?;
                    }
                }
                Term::Edition => self.text(node, term, citation.edition.as_ref()),
                Term::CitationIdentifier => {
                    for identifier in &citation.identifiers {
                        self.identifier(node, term, identifier)?;
                    }
                }
                Term::CitedResponsibleParty => {
                    for party in &citation.cited_responsible_parties {
                        self.shared(node, term, party, Self::responsibility)?;
                    }
                }
                Term::OtherCitationDetails => {
                    self.text(node, term, citation.other_citation_details.as_ref())
                }
                Term::CitationOnlineResource => {
                    for resource in &citation.online_resources {
                        self.shared(node, term, resource, Self::online_resource)?;
                    }
                }
                _ => {}
            }
        }
        self.check_representable(
            Class::Citation,
            Term::CitationOnlineResource,
            !citation.online_resources.is_empty(),
        );
        Ok(())
    }

    fn citation_date(&mut self, parent: NodeId, term: Term, date: &CitationDate) -> Result<()> {
        self.object(parent, term, Term::CiDate, |e, node| {
            for &term in e.order(Class::CitationDate) {
                match term {
                    Term::DateValue => {
                        if let Some(prop) = e.property(node, term) {
                            primitive::write_date(&mut e.doc, &e.ctx, prop, &date.date);
                        }
                    }
                    Term::DateType => e.code(node, term, date.date_type),
                    _ => {}
                }
            }
            Ok(())
        })
    }

    fn responsibility(&mut self, node: NodeId, responsibility: &Responsibility) -> Result<()> {
        if self.ctx.is_legacy() {
            return self.responsible_party(node, responsibility);
        }
        for &term in self.order(Class::Responsibility) {
            match term {
                Term::Role => self.code(node, term, responsibility.role),
                Term::Party => {
                    for party in &responsibility.parties {
                        self.party(node, term, party)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// ISO 19139 `CI_ResponsibleParty`: one individual, one organisation
    /// and one contact, flattened into the responsibility.
    fn responsible_party(&mut self, node: NodeId, responsibility: &Responsibility) -> Result<()> {
        let parties = &responsibility.parties;
        let individual = parties.iter().find(|p| p.kind == PartyKind::Individual);
        let organisation = parties.iter().find(|p| p.kind == PartyKind::Organisation);
        let contact = parties.iter().flat_map(|p| &p.contact_info).next();

        let individuals = parties.iter().filter(|p| p.kind == PartyKind::Individual).count();
        if individuals > 1 || parties.len() - individuals > 1 {
            self.truncated(Class::Responsibility, Term::Party);
        }
        if parties.iter().map(|p| p.contact_info.len()).sum::<usize>() > 1 {
            self.truncated(Class::Responsibility, Term::ContactInfo);
        }
        if organisation.is_some_and(|p| p.position_name.is_some()) {
            self.not_representable(Class::Organisation, Term::PositionName);
        }

        for &term in self.order(Class::Responsibility) {
            match term {
                Term::IndividualName => {
                    self.text(node, term, individual.and_then(|p| p.name.as_ref()))
                }
                Term::OrganisationName => {
                    self.text(node, term, organisation.and_then(|p| p.name.as_ref()))
                }
                Term::PositionName => {
                    self.text(node, term, individual.and_then(|p| p.position_name.as_ref()))
                }
                Term::ContactInfo => {
                    if let Some(contact) = contact {
                        self.object(node, term, Term::CiContact, |e, n| e.contact(n, contact))?;
                    }
                }
                Term::Role => self.code(node, term, responsibility.role),
                _ => {}
            }
        }
        Ok(())
    }

    fn party(&mut self, parent: NodeId, term: Term, party: &Party) -> Result<()> {
        let (class, element) = match party.kind {
            PartyKind::Individual => (Class::Individual, Term::CiIndividual),
            PartyKind::Organisation => (Class::Organisation, Term::CiOrganisation),
        };
        self.object(parent, term, element, |e, node| {
            for &term in e.order(class) {
                match term {
                    Term::PartyName => e.text(node, term, party.name.as_ref()),
                    Term::ContactInfo => {
                        for contact in &party.contact_info {
                            e.object(node, term, Term::CiContact, |e, n| e.contact(n, contact))?;
                        }
                    }
                    Term::PositionName => e.text(node, term, party.position_name.as_ref()),
                    _ => {}
                }
            }
            if class == Class::Organisation && party.position_name.is_some() {
                e.not_representable(class, Term::PositionName);
            }
            Ok(())
        })
    }

    fn contact(&mut self, node: NodeId, contact: &Contact) -> Result<()> {
        for &term in self.order(Class::Contact) {
            match term {
                Term::Address => {
                    if contact.electronic_mail_addresses.is_empty() {
                        continue;
                    }
                    self.object(node, term, Term::CiAddress, |e, address| {
                        for mail in &contact.electronic_mail_addresses {
                            e.string(address, Term::ElectronicMailAddress, Some(mail.as_str()));
                        }
                        Ok(())
                    })?;
                }
                Term::ContactOnlineResource => {
                    let limit = if self.ctx.is_legacy() { 1 } else { usize::MAX };
                    for resource in contact.online_resources.iter().take(limit) {
                        self.shared(node, term, resource, Self::online_resource)?;
                    }
                    if contact.online_resources.len() > limit {
                        self.truncated(Class::Contact, term);
                    }
                }
                Term::ContactInstructions => {
                    self.text(node, term, contact.contact_instructions.as_ref())
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn online_resource(&mut self, node: NodeId, resource: &OnlineResource) -> Result<()> {
        for &term in self.order(Class::OnlineResource) {
            match term {
                Term::Linkage => {
                    let Some(linkage) = resource.linkage.as_deref().filter(|l| !l.is_empty())
                    else {
                        continue;
                    };
                    if let Some(prop) = self.property(node, term) {
                        primitive::write_url(&mut self.doc, &self.ctx, prop, linkage);
                    }
                }
                Term::Protocol => self.string(node, term, resource.protocol.as_deref()),
                Term::ResourceName => self.text(node, term, resource.name.as_ref()),
                Term::ResourceDescription => self.text(node, term, resource.description.as_ref()),
                Term::Function => self.code(node, term, resource.function),
                _ => {}
            }
        }
        Ok(())
    }

    fn data_identification(&mut self, node: NodeId, identification: &DataIdentification) -> Result<()> {
        for &term in self.order(Class::DataIdentification) {
            match term {
                Term::IdentificationCitation => {
                    if let Some(citation) = &identification.citation {
                        self.shared(node, term, citation, Self::citation)?;
                    }
                }
                Term::Abstract => self.text(node, term, identification.abstract_text.as_ref()),
                Term::PointOfContact => {
                    for contact in &identification.points_of_contact {
                        self.shared(node, term, contact, Self::responsibility)?;
                    }
                }
                Term::SpatialResolution => {
                    for resolution in &identification.spatial_resolutions {
                        self.object(node, term, Term::MdResolution, |e, n| e.resolution(n, resolution))?;
                    }
                }
                Term::ResourceConstraints => {
                    for constraints in &identification.resource_constraints {
                        self.constraints(node, term, constraints)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn resolution(&mut self, node: NodeId, resolution: &Resolution) -> Result<()> {
        match resolution {
            Resolution::EquivalentScale(denominator) => self.object(
                node,
                Term::EquivalentScale,
                Term::MdRepresentativeFraction,
                |e, fraction| {
                    if let Some(prop) = e.property(fraction, Term::Denominator) {
                        primitive::write_integer(&mut e.doc, &e.ctx, prop, *denominator);
                    }
                    Ok(())
                },
            ),
            Resolution::Distance(distance) => {
                if let Some(prop) = self.property(node, Term::ResolutionDistance) {
                    measure::write_distance(&mut self.doc, &self.ctx, prop, distance);
                }
                Ok(())
            }
        }
    }

    fn constraints(&mut self, parent: NodeId, term: Term, constraints: &Constraints) -> Result<()> {
        let element = match constraints.kind {
            ConstraintKind::Basic => Term::MdConstraints,
            ConstraintKind::Legal => Term::MdLegalConstraints,
            ConstraintKind::Security => Term::MdSecurityConstraints,
        };
        let legal = constraints.kind == ConstraintKind::Legal;
        let security = constraints.kind == ConstraintKind::Security;

        self.object(parent, term, element, |e, node| {
            for &term in e.order(Class::Constraints) {
                match term {
                    Term::UseLimitation => e.texts(node, term, &constraints.use_limitations),
                    Term::ConstraintReference => {
                        for reference in &constraints.references {
                            e.shared(node, term, reference, Self::citation)?;
                        }
                    }
                    Term::AccessConstraints if legal => {
                        for code in &constraints.access_constraints {
                            e.code(node, term, Some(*code));
                        }
                    }
                    Term::UseConstraints if legal => {
                        for code in &constraints.use_constraints {
                            e.code(node, term, Some(*code));
                        }
                    }
                    Term::OtherConstraints if legal => {
                        e.texts(node, term, &constraints.other_constraints)
                    }
                    Term::Classification if security => {
                        e.code(node, term, constraints.classification)
                    }
                    _ => {}
                }
            }

            e.check_representable(
                Class::Constraints,
                Term::ConstraintReference,
                !constraints.references.is_empty(),
            );
            if !legal {
                let dropped = [
                    (Term::AccessConstraints, constraints.access_constraints.is_empty()),
                    (Term::UseConstraints, constraints.use_constraints.is_empty()),
                    (Term::OtherConstraints, constraints.other_constraints.is_empty()),
                ];
                for (term, empty) in dropped {
                    if !empty {
                        e.not_representable(Class::Constraints, term);
                    }
                }
            }
            if !security && constraints.classification.is_some() {
                e.not_representable(Class::Constraints, Term::Classification);
            }
            Ok(())
        })
    }

    fn data_quality(&mut self, node: NodeId, quality: &DataQuality, lineage: Option<&Lineage>) -> Result<()> {
        for &term in self.order(Class::DataQuality) {
            match term {
                Term::QualityScope => {
                    if let Some(level) = quality.scope {
                        self.object(node, term, Term::DqScope, |e, scope| {
                            e.code(scope, Term::ScopeLevel, Some(level));
                            Ok(())
                        })?;
                    }
                }
                Term::Report => {
                    for report in &quality.reports {
                        self.quality_element(node, term, report)?;
                    }
                }
                Term::QualityLineage => {
                    if let Some(lineage) = lineage {
                        self.object(node, term, Term::LiLineage, |e, n| e.lineage(n, lineage))?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn quality_element(&mut self, parent: NodeId, term: Term, element: &QualityElement) -> Result<()> {
        let Some(prop) = self.property(parent, term) else {
            return Ok(());
        };
        let node = self
            .doc
            .append(prop, self.ctx.quality_element(element.kind).to_name());
        self.nested(|e| {
            for &term in e.order(Class::QualityElement) {
                match term {
                    Term::Measure => {
                        let described = !element.names_of_measure.is_empty()
                            || element.measure_identification.is_some()
                            || element.measure_description.is_some();
                        if described {
                            e.object(node, term, Term::DqMeasureReference, |e, n| {
                                e.measure_reference(n, element)
                            })?;
                        }
                    }
                    Term::QualityResult => {
                        let limit = if e.ctx.is_legacy() {
                            LEGACY_MAX_RESULTS
                        } else {
                            usize::MAX
                        };
                        for result in element.results.iter().take(limit) {
                            e.quality_result(node, term, result)?;
                        }
                        if element.results.len() > limit {
                            e.truncated(Class::QualityElement, term);
                        }
                    }
                    other => e.measure_property(node, other, element)?,
                }
            }
            Ok(())
        })
    }

    fn measure_reference(&mut self, node: NodeId, element: &QualityElement) -> Result<()> {
        for &term in self.order(Class::MeasureReference) {
            self.measure_property(node, term, element)?;
        }
        Ok(())
    }

    /// A measure description property, written on the quality element in
    /// ISO 19139 and on its measure reference in ISO 19115-3.
    fn measure_property(&mut self, node: NodeId, term: Term, element: &QualityElement) -> Result<()> {
        match term {
            Term::NameOfMeasure => self.texts(node, term, &element.names_of_measure),
            Term::MeasureIdentification => {
                if let Some(identifier) = &element.measure_identification {
                    self.identifier(node, term, identifier)?;
                }
            }
            Term::MeasureDescription => {
                self.text(node, term, element.measure_description.as_ref())
            }
            _ => {}
        }
        Ok(())
    }

    fn quality_result(&mut self, parent: NodeId, term: Term, result: &QualityResult) -> Result<()> {
        match result {
            QualityResult::Conformance {
                specification,
                explanation,
                pass,
            } => self.object(parent, term, Term::DqConformanceResult, |e, node| {
                for &term in e.order(Class::ConformanceResult) {
                    match term {
                        Term::Specification => {
                            if let Some(specification) = specification {
                                e.shared(node, term, specification, Self::citation)?;
                            }
                        }
                        Term::Explanation => e.text(node, term, explanation.as_ref()),
                        Term::Pass => {
                            let Some(pass) = pass else {
                                continue;
                            };
                            if let Some(prop) = e.property(node, term) {
                                primitive::write_boolean(&mut e.doc, &e.ctx, prop, *pass);
                            }
                        }
                        _ => {}
                    }
                }
                Ok(())
            }),
            QualityResult::Quantitative { value_unit, values } => {
                self.object(parent, term, Term::DqQuantitativeResult, |e, node| {
                    for &term in e.order(Class::QuantitativeResult) {
                        match term {
                            Term::ValueUnit => {
                                if let Some(unit) = value_unit {
                                    e.value_unit(node, *unit);
                                }
                            }
                            Term::ResultValue => {
                                for value in values {
                                    if let Some(prop) = e.property(node, term) {
                                        primitive::write_record(&mut e.doc, &e.ctx, prop, *value);
                                    }
                                }
                            }
                            _ => {}
                        }
                    }
                    Ok(())
                })
            }
        }
    }

    /// The unit of a quantitative result: a pointer to its canonical
    /// reference when preferred and available, otherwise a unit definition
    /// written once per document and referenced afterwards.
    fn value_unit(&mut self, node: NodeId, unit: Unit) {
        let Some(prop) = self.property(node, Term::ValueUnit) else {
            return;
        };
        let href = Name::new(Namespace::Xlink.uri(), "href");
        if self.prefer_unit_pointers {
            if let Some(reference) = self.ctx.unit_reference(unit) {
                self.doc.set_attribute(prop, href, reference);
                return;
            }
        }
        if let Some(id) = self.units.get(&unit) {
            self.doc.set_attribute(prop, href, format!("#{}", id));
            return;
        }
        let base = measure::definition_id(unit);
        let mut id = base.clone();
        let mut suffix = 1;
        while !self.identities.reserve(&id) {
            suffix += 1;
            id = format!("{}-{}", base, suffix);
        }
        measure::write_definition(&mut self.doc, prop, unit, &id);
        self.units.insert(unit, id);
    }

    fn lineage(&mut self, node: NodeId, lineage: &Lineage) -> Result<()> {
        for &term in self.order(Class::Lineage) {
            match term {
                Term::Statement => self.text(node, term, lineage.statement.as_ref()),
                Term::ProcessStep => {
                    for step in &lineage.process_steps {
                        self.object(node, term, Term::LiProcessStep, |e, n| {
                            e.text(n, Term::StepDescription, step.description.as_ref());
                            Ok(())
                        })?;
                    }
                }
                Term::Source => {
                    for source in &lineage.sources {
                        self.object(node, term, Term::LiSource, |e, n| {
                            e.text(n, Term::StepDescription, source.description.as_ref());
                            Ok(())
                        })?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}
