//! Decoding of an element tree into a metadata graph.
//!
//! The [`Decoder`] mirrors the encoder: one method per class, each matching
//! the child elements of the object against the class properties of the
//! dialect. Unknown children are reported and skipped.
//!
//! Failures of a single property (a unit that cannot be identified, a value
//! that is not a number) do not stop the walk. They are collected and
//! returned together once the whole document has been read, along with
//! references that no element declares.

use crate::adapters::code::{self, Multiplicity};
use crate::adapters::{display_name, first_child, href, is, is_nil, measure, primitive, text, unexpected};
use crate::config::CodecConfig;
use crate::dialect::{Dialect, DialectContext, Direction};
use crate::error::{CodecError, Result};
use crate::identity::{ReadIdentities, Shared};
use crate::phase::Traversal;
use crate::terms::{Class, Term};
use crate::warning::{MessageKey, Warning, WarningListener, Warnings};
use isomd_metadata::{
    Citation, CitationDate, CitationRegistry, CodeList, ConstraintKind, Constraints, Contact,
    DataIdentification, DataQuality, DateType, Identifier, InternationalString, Lineage, Metadata,
    OnlineResource, Party, PartyKind, ProcessStep, QualityElement, QualityResult, Resolution,
    Responsibility, Restriction, Source, Unit,
};
use isomd_xml_tree::{Document, NodeId};
use std::iter;
use std::sync::Arc;

/// Reads one document. A decoder is used for a single call.
pub struct Decoder<'d, 'l> {
    ctx: DialectContext,
    doc: &'d Document,
    registry: &'static CitationRegistry,
    identities: ReadIdentities,
    warnings: Warnings<'l>,
    traversal: Traversal,
    /// Property failures, reported when the document is complete.
    failures: Vec<CodecError>,
}

impl<'d, 'l> Decoder<'d, 'l> {
    pub(crate) fn new(
        dialect: Dialect,
        doc: &'d Document,
        config: &CodecConfig,
        listener: Option<&'l mut dyn WarningListener>,
    ) -> Self {
        Self {
            ctx: DialectContext::new(dialect, Direction::Reading),
            doc,
            registry: CitationRegistry::global(),
            identities: ReadIdentities::default(),
            warnings: Warnings::new(listener),
            traversal: Traversal::new(config.max_depth),
            failures: Vec::new(),
        }
    }

    /// Ends the call. Collected failures and dangling references turn a
    /// decoded value into an error.
    pub(crate) fn finish<T>(mut self, value: Result<T>) -> Result<(T, Vec<Warning>)> {
        let value = value.and_then(|value| {
            let mut failures = std::mem::take(&mut self.failures);
            failures.extend(self.identities.unresolved());
            CodecError::from_failures(failures).map(|()| value)
        });
        let value = self.traversal.finish(value);
        tracing::trace!(phase = ?self.traversal.phase(), "document read");
        Ok((value?, self.warnings.into_vec()))
    }

    pub(crate) fn decode_metadata(&mut self, root: NodeId) -> Result<Metadata> {
        self.nested(|d| d.metadata(root))
    }

    pub(crate) fn decode_citation(&mut self, root: NodeId) -> Result<Arc<Citation>> {
        self.shared_node(root, None, Self::citation)
    }

    // Traversal helpers

    fn nested<T>(&mut self, read: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.traversal.enter()?;
        let result = read(self);
        self.traversal.leave();
        result
    }

    /// The child elements of `node` with the property of `class` each one
    /// is, skipping and reporting unknown elements.
    fn properties(&mut self, node: NodeId, class: Class) -> Vec<(Term, NodeId)> {
        let doc = self.doc;
        let mut properties = Vec::new();
        for child in doc.children(node) {
            match self.ctx.property_of(class, &doc.element(child).name) {
                Some(term) => properties.push((term, child)),
                None => unexpected(doc, &mut self.warnings, node, child),
            }
        }
        properties
    }

    /// The value element of an object property, if it is one of `accepted`.
    fn element_of(&mut self, prop: NodeId, accepted: &[Term]) -> Option<NodeId> {
        let doc = self.doc;
        if is_nil(doc, &self.ctx, prop) {
            return None;
        }
        let Some(node) = first_child(doc, prop) else {
            if let Some(target) = href(doc, prop) {
                tracing::debug!(href = target, "reference to an unshared object skipped");
            }
            return None;
        };
        if accepted.iter().any(|term| is(doc, &self.ctx, node, *term)) {
            Some(node)
        } else {
            unexpected(doc, &mut self.warnings, prop, node);
            None
        }
    }

    /// Reads a property holding an object of element `element`.
    fn object<T, F>(&mut self, prop: NodeId, element: Term, read: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut Self, NodeId) -> Result<T>,
    {
        let Some(node) = self.element_of(prop, &[element]) else {
            return Ok(None);
        };
        self.nested(|d| read(d, node)).map(Some)
    }

    /// Reads a property holding a shared object, either inline or as an
    /// `xlink:href` to the element declaring it.
    fn shared<T, F>(&mut self, prop: NodeId, read: F) -> Result<Option<Arc<T>>>
    where
        T: Shared,
        F: FnOnce(&mut Self, NodeId) -> Result<T>,
    {
        let doc = self.doc;
        if is_nil(doc, &self.ctx, prop) {
            return Ok(None);
        }
        if let Some(node) = first_child(doc, prop) {
            let matches = self
                .ctx
                .class_name(T::CLASS)
                .is_some_and(|name| name.matches(&doc.element(node).name));
            if !matches {
                unexpected(doc, &mut self.warnings, prop, node);
                return Ok(None);
            }
            return self.shared_node(node, None, read).map(Some);
        }
        let Some(target) = href(doc, prop) else {
            return Ok(None);
        };
        let Some(id) = target.strip_prefix('#') else {
            tracing::debug!(href = target, "external reference skipped");
            return Ok(None);
        };
        match self.identities.resolve(doc, id, &mut self.warnings) {
            Some(node) => self.shared_node(node, Some(id), read).map(Some),
            None => {
                self.identities.dangling(id);
                Ok(None)
            }
        }
    }

    /// Builds the shared object declared by `node`, or returns the one
    /// already built from it. `via` is the identifier `node` was reached
    /// through, if any. The caller has checked the element of inline
    /// objects, so a mismatch here is a reference to another type.
    fn shared_node<T, F>(&mut self, node: NodeId, via: Option<&str>, read: F) -> Result<Arc<T>>
    where
        T: Shared,
        F: FnOnce(&mut Self, NodeId) -> Result<T>,
    {
        let doc = self.doc;
        let element = doc.element(node);
        let declared = element.attribute(None, "id");
        let reference = || via.or(declared).unwrap_or_default().to_string();

        if let Some(object) = self.identities.built(node) {
            return match T::unwrap(object) {
                Some(value) => Ok(value),
                None => Err(CodecError::ReferenceTypeMismatch {
                    id: reference(),
                    expected: T::CLASS.name().to_string(),
                    found: object.class().name().to_string(),
                }),
            };
        }
        if self.identities.is_in_progress(node) {
            return Err(CodecError::CyclicReference { id: reference() });
        }
        let matches = self
            .ctx
            .class_name(T::CLASS)
            .is_some_and(|name| name.matches(&element.name));
        if !matches {
            return Err(CodecError::ReferenceTypeMismatch {
                id: reference(),
                expected: T::CLASS.name().to_string(),
                found: display_name(&element.name),
            });
        }

        if let Some(id) = declared {
            self.identities.declare(id, node, &mut self.warnings);
        }
        self.identities.start(node);
        let result = self.nested(|d| read(d, node));
        let value = match result {
            Ok(mut value) => {
                value.set_id(declared.map(str::to_string));
                Arc::new(value)
            }
            Err(error) => {
                self.identities.finish(node, None);
                return Err(error);
            }
        };
        self.identities.finish(node, Some(T::wrap(Arc::clone(&value))));
        Ok(value)
    }

    /// Keeps a property failure for the end of the document.
    fn recover<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::debug!(error = %error, "property dropped");
                self.failures.push(error);
                None
            }
        }
    }

    // Values

    fn text(&mut self, prop: NodeId) -> Option<InternationalString> {
        text::read(self.doc, &self.ctx, prop, &mut self.warnings)
    }

    fn string(&mut self, prop: NodeId) -> Option<String> {
        primitive::read_string(self.doc, &self.ctx, prop, &mut self.warnings)
    }

    fn code<C: CodeList>(&mut self, prop: NodeId, multiplicity: Multiplicity) -> Option<C> {
        code::read(self.doc, &self.ctx, prop, multiplicity, &mut self.warnings)
    }

    // Classes

    fn metadata(&mut self, node: NodeId) -> Result<Metadata> {
        let mut metadata = Metadata::default();
        let mut standard_name = None;
        let mut standard_version = None;

        for (term, prop) in self.properties(node, Class::Metadata) {
            match term {
                Term::FileIdentifier => {
                    if let Some(code) = self.string(prop) {
                        metadata.metadata_identifier = Some(Identifier::new(code));
                    }
                }
                Term::MetadataIdentifier => metadata.metadata_identifier = self.identifier(prop)?,
                Term::Language => metadata.language = self.legacy_language(prop),
                Term::DefaultLocale => {
                    metadata.language = self.object(prop, Term::PtLocale, Self::locale)?.flatten()
                }
                Term::MetadataContact => {
                    metadata.contacts.extend(self.shared(prop, Self::responsibility)?)
                }
                Term::DateStamp => {
                    if let Some(date) = primitive::read_date(self.doc, &self.ctx, prop, &mut self.warnings) {
                        metadata.date_info.push(CitationDate::new(date, DateType::Creation));
                    }
                }
                Term::DateInfo => metadata.date_info.extend(self.citation_date(prop)?),
                Term::MetadataStandardName => standard_name = self.text(prop),
                Term::MetadataStandardVersion => standard_version = self.text(prop),
                Term::MetadataStandard => {
                    metadata.metadata_standards.extend(self.shared(prop, Self::citation)?)
                }
                Term::IdentificationInfo => metadata.identification_info.extend(self.object(
                    prop,
                    Term::MdDataIdentification,
                    Self::data_identification,
                )?),
                Term::DataQualityInfo => {
                    if let Some((quality, lineages)) =
                        self.object(prop, Term::DqDataQuality, Self::data_quality)?
                    {
                        let lineage_only = !lineages.is_empty() && quality.is_empty();
                        metadata.resource_lineages.extend(lineages);
                        if !lineage_only {
                            metadata.data_quality_info.push(quality);
                        }
                    }
                }
                Term::ResourceLineage => metadata
                    .resource_lineages
                    .extend(self.object(prop, Term::LiLineage, Self::lineage)?),
                Term::MetadataConstraints => {
                    metadata.metadata_constraints.extend(self.constraints(prop)?)
                }
                _ => {}
            }
        }

        if let Some(name) = standard_name {
            let standard = self.standard(name, standard_version);
            metadata.metadata_standards.push(standard);
        }
        Ok(metadata)
    }

    /// The metadata standard named by ISO 19139 `metadataStandardName`.
    /// Built-in standards resolve to the registry citation when the version
    /// is absent or matches its edition.
    fn standard(&self, name: InternationalString, version: Option<InternationalString>) -> Arc<Citation> {
        if let Some(registered) = self.registry.find_by_title(name.text()) {
            let same_edition = match &version {
                None => true,
                Some(version) => registered
                    .edition
                    .as_ref()
                    .is_some_and(|edition| edition.text() == version.text()),
            };
            if same_edition {
                return registered;
            }
        }
        Arc::new(Citation {
            title: Some(name),
            edition: version,
            ..Default::default()
        })
    }

    /// ISO 19139 `gmd:language`, a character string or a language code.
    fn legacy_language(&mut self, prop: NodeId) -> Option<String> {
        let node = self.element_of(prop, &[Term::CharacterString, Term::LanguageCode])?;
        language_code(self.doc, node)
    }

    fn locale(&mut self, node: NodeId) -> Result<Option<String>> {
        let mut language = None;
        for (term, prop) in self.properties(node, Class::Locale) {
            match term {
                Term::LocaleLanguage => {
                    if let Some(code) = self.element_of(prop, &[Term::LanguageCode]) {
                        language = language_code(self.doc, code);
                    }
                }
                Term::CharacterEncoding => {
                    if let Some(code) = self.element_of(prop, &[Term::CharacterSetCode]) {
                        let encoding = language_code(self.doc, code).unwrap_or_default();
                        if !encoding.eq_ignore_ascii_case("utf8") && !encoding.eq_ignore_ascii_case("utf-8") {
                            tracing::debug!(encoding = %encoding, "declared character encoding ignored");
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(language)
    }

    fn identifier(&mut self, prop: NodeId) -> Result<Option<Identifier>> {
        let Some(node) = self.element_of(prop, &[Term::MdIdentifier, Term::RsIdentifier]) else {
            return Ok(None);
        };
        self.nested(|d| {
            let mut identifier = Identifier::default();
            for (term, prop) in d.properties(node, Class::Identifier) {
                match term {
                    Term::Authority => identifier.authority = d.shared(prop, Self::citation)?,
                    Term::Code => identifier.code = d.string(prop).unwrap_or_default(),
                    Term::CodeSpace => identifier.code_space = d.string(prop),
                    Term::Version => identifier.version = d.string(prop),
                    Term::IdentifierDescription => identifier.description = d.text(prop),
                    _ => {}
                }
            }
            Ok(Some(identifier))
        })
    }

    fn citation(&mut self, node: NodeId) -> Result<Citation> {
        let mut citation = Citation::default();
        for (term, prop) in self.properties(node, Class::Citation) {
            match term {
                Term::Title => citation.title = self.text(prop),
                Term::AlternateTitle => citation.alternate_titles.extend(self.text(prop)),
                Term::CitationDate => citation.dates.extend(self.citation_date(prop)?),
                Term::Edition => citation.edition = self.text(prop),
                Term::CitationIdentifier => citation.identifiers.extend(self.identifier(prop)?),
                Term::CitedResponsibleParty => citation
                    .cited_responsible_parties
                    .extend(self.shared(prop, Self::responsibility)?),
                Term::OtherCitationDetails => citation.other_citation_details = self.text(prop),
                Term::CitationOnlineResource => citation
                    .online_resources
                    .extend(self.shared(prop, Self::online_resource)?),
                _ => {}
            }
        }
        Ok(citation)
    }

    fn citation_date(&mut self, prop: NodeId) -> Result<Option<CitationDate>> {
        let date = self.object(prop, Term::CiDate, |d, node| {
            let mut date = None;
            let mut date_type = None;
            for (term, prop) in d.properties(node, Class::CitationDate) {
                match term {
                    Term::DateValue => {
                        date = primitive::read_date(d.doc, &d.ctx, prop, &mut d.warnings)
                    }
                    Term::DateType => date_type = d.code(prop, Multiplicity::Single),
                    _ => {}
                }
            }
            if date.is_none() {
                d.warnings
                    .emit(MessageKey::NullCollectionElement, [Class::CitationDate.name()]);
            }
            Ok(date.map(|date| CitationDate { date, date_type }))
        })?;
        Ok(date.flatten())
    }

    fn responsibility(&mut self, node: NodeId) -> Result<Responsibility> {
        let mut responsibility = Responsibility::default();
        let mut individual: Option<Party> = None;
        let mut organisation: Option<Party> = None;
        let mut contacts = Vec::new();

        for (term, prop) in self.properties(node, Class::Responsibility) {
            match term {
                Term::IndividualName => {
                    individual.get_or_insert_with(Party::default).name = self.text(prop)
                }
                Term::PositionName => {
                    individual.get_or_insert_with(Party::default).position_name = self.text(prop)
                }
                Term::OrganisationName => {
                    organisation
                        .get_or_insert_with(|| Party {
                            kind: PartyKind::Organisation,
                            ..Default::default()
                        })
                        .name = self.text(prop)
                }
                Term::ContactInfo => contacts.extend(self.object(prop, Term::CiContact, Self::contact)?),
                Term::Role => responsibility.role = self.code(prop, Multiplicity::Single),
                Term::Party => responsibility.parties.extend(self.party(prop)?),
                _ => {}
            }
        }

        responsibility.parties.extend(individual.into_iter().chain(organisation));
        if !contacts.is_empty() {
            match responsibility.parties.first_mut() {
                Some(party) => party.contact_info.extend(contacts),
                None => responsibility.parties.push(Party {
                    contact_info: contacts,
                    ..Default::default()
                }),
            }
        }
        Ok(responsibility)
    }

    /// An ISO 19115-3 party. Individuals nested in an organisation follow
    /// it in the returned list.
    fn party(&mut self, prop: NodeId) -> Result<Vec<Party>> {
        let Some(node) = self.element_of(prop, &[Term::CiIndividual, Term::CiOrganisation]) else {
            return Ok(Vec::new());
        };
        let (kind, class) = if is(self.doc, &self.ctx, node, Term::CiIndividual) {
            (PartyKind::Individual, Class::Individual)
        } else {
            (PartyKind::Organisation, Class::Organisation)
        };
        self.nested(|d| {
            let mut party = Party {
                kind,
                ..Default::default()
            };
            let mut members = Vec::new();
            for (term, prop) in d.properties(node, class) {
                match term {
                    Term::PartyName => party.name = d.text(prop),
                    Term::ContactInfo => party
                        .contact_info
                        .extend(d.object(prop, Term::CiContact, Self::contact)?),
                    Term::PositionName => party.position_name = d.text(prop),
                    Term::PartyIndividual => members.extend(d.party(prop)?),
                    _ => {}
                }
            }
            Ok(iter::once(party).chain(members).collect())
        })
    }

    fn contact(&mut self, node: NodeId) -> Result<Contact> {
        let mut contact = Contact::default();
        for (term, prop) in self.properties(node, Class::Contact) {
            match term {
                Term::Address => {
                    let addresses = self.object(prop, Term::CiAddress, |d, address| {
                        let mut mails = Vec::new();
                        for (term, prop) in d.properties(address, Class::Address) {
                            if term == Term::ElectronicMailAddress {
                                mails.extend(d.string(prop));
                            }
                        }
                        Ok(mails)
                    })?;
                    contact
                        .electronic_mail_addresses
                        .extend(addresses.into_iter().flatten());
                }
                Term::ContactOnlineResource => contact
                    .online_resources
                    .extend(self.shared(prop, Self::online_resource)?),
                Term::ContactInstructions => contact.contact_instructions = self.text(prop),
                _ => {}
            }
        }
        Ok(contact)
    }

    fn online_resource(&mut self, node: NodeId) -> Result<OnlineResource> {
        let mut resource = OnlineResource::default();
        for (term, prop) in self.properties(node, Class::OnlineResource) {
            match term {
                Term::Linkage => resource.linkage = self.string(prop),
                Term::Protocol => resource.protocol = self.string(prop),
                Term::ResourceName => resource.name = self.text(prop),
                Term::ResourceDescription => resource.description = self.text(prop),
                Term::Function => resource.function = self.code(prop, Multiplicity::Single),
                _ => {}
            }
        }
        Ok(resource)
    }

    fn data_identification(&mut self, node: NodeId) -> Result<DataIdentification> {
        let mut identification = DataIdentification::default();
        for (term, prop) in self.properties(node, Class::DataIdentification) {
            match term {
                Term::IdentificationCitation => {
                    identification.citation = self.shared(prop, Self::citation)?
                }
                Term::Abstract => identification.abstract_text = self.text(prop),
                Term::PointOfContact => identification
                    .points_of_contact
                    .extend(self.shared(prop, Self::responsibility)?),
                Term::SpatialResolution => identification.spatial_resolutions.extend(
                    self.object(prop, Term::MdResolution, Self::resolution)?
                        .flatten(),
                ),
                Term::ResourceConstraints => {
                    identification.resource_constraints.extend(self.constraints(prop)?)
                }
                _ => {}
            }
        }
        Ok(identification)
    }

    fn resolution(&mut self, node: NodeId) -> Result<Option<Resolution>> {
        let mut resolution = None;
        for (term, prop) in self.properties(node, Class::Resolution) {
            let value = match term {
                Term::EquivalentScale => self
                    .object(prop, Term::MdRepresentativeFraction, |d, fraction| {
                        let mut denominator = None;
                        for (term, prop) in d.properties(fraction, Class::RepresentativeFraction) {
                            if term == Term::Denominator {
                                denominator =
                                    primitive::read_integer(d.doc, &d.ctx, prop, &mut d.warnings);
                            }
                        }
                        Ok(denominator)
                    })?
                    .flatten()
                    .map(Resolution::EquivalentScale),
                Term::ResolutionDistance => {
                    let distance = measure::read_distance(self.doc, &self.ctx, prop, &mut self.warnings);
                    self.recover(distance).flatten().map(Resolution::Distance)
                }
                _ => None,
            };
            resolution = resolution.or(value);
        }
        Ok(resolution)
    }

    fn constraints(&mut self, prop: NodeId) -> Result<Option<Constraints>> {
        let accepted = [
            Term::MdConstraints,
            Term::MdLegalConstraints,
            Term::MdSecurityConstraints,
        ];
        let Some(node) = self.element_of(prop, &accepted) else {
            return Ok(None);
        };
        let kind = if is(self.doc, &self.ctx, node, Term::MdLegalConstraints) {
            ConstraintKind::Legal
        } else if is(self.doc, &self.ctx, node, Term::MdSecurityConstraints) {
            ConstraintKind::Security
        } else {
            ConstraintKind::Basic
        };
        self.nested(|d| {
            let mut constraints = Constraints {
                kind,
                ..Default::default()
            };
            for (term, prop) in d.properties(node, Class::Constraints) {
                match term {
                    Term::UseLimitation => constraints.use_limitations.extend(d.text(prop)),
                    Term::ConstraintReference => constraints
                        .references
                        .extend(d.shared(prop, Self::citation)?),
                    Term::AccessConstraints => constraints
                        .access_constraints
                        .extend(d.code::<Restriction>(prop, Multiplicity::Collection)),
                    Term::UseConstraints => constraints
                        .use_constraints
                        .extend(d.code::<Restriction>(prop, Multiplicity::Collection)),
                    Term::OtherConstraints => constraints.other_constraints.extend(d.text(prop)),
                    Term::Classification => {
                        constraints.classification = d.code(prop, Multiplicity::Single)
                    }
                    _ => {}
                }
            }
            Ok(Some(constraints))
        })
    }

    /// A quality block and the lineages ISO 19139 nests in it.
    fn data_quality(&mut self, node: NodeId) -> Result<(DataQuality, Vec<Lineage>)> {
        let mut quality = DataQuality::default();
        let mut lineages = Vec::new();
        for (term, prop) in self.properties(node, Class::DataQuality) {
            match term {
                Term::QualityScope => {
                    quality.scope = self
                        .object(prop, Term::DqScope, |d, scope| {
                            let mut level = None;
                            for (term, prop) in d.properties(scope, Class::Scope) {
                                if term == Term::ScopeLevel {
                                    level = d.code(prop, Multiplicity::Single);
                                }
                            }
                            Ok(level)
                        })?
                        .flatten()
                }
                Term::Report => quality.reports.extend(self.quality_element(prop)?),
                Term::QualityLineage => {
                    lineages.extend(self.object(prop, Term::LiLineage, Self::lineage)?)
                }
                _ => {}
            }
        }
        Ok((quality, lineages))
    }

    fn quality_element(&mut self, prop: NodeId) -> Result<Option<QualityElement>> {
        let doc = self.doc;
        if is_nil(doc, &self.ctx, prop) {
            return Ok(None);
        }
        let Some(node) = first_child(doc, prop) else {
            return Ok(None);
        };
        let Some(kind) = self.ctx.quality_kind(&doc.element(node).name) else {
            unexpected(doc, &mut self.warnings, prop, node);
            return Ok(None);
        };
        self.nested(|d| {
            let mut element = QualityElement::new(kind);
            for (term, prop) in d.properties(node, Class::QualityElement) {
                match term {
                    Term::Measure => {
                        d.object(prop, Term::DqMeasureReference, |d, reference| {
                            for (term, prop) in d.properties(reference, Class::MeasureReference) {
                                d.measure_property(&mut element, term, prop)?;
                            }
                            Ok(())
                        })?;
                    }
                    Term::QualityResult => element.results.extend(d.quality_result(prop)?),
                    other => d.measure_property(&mut element, other, prop)?,
                }
            }
            Ok(Some(element))
        })
    }

    fn measure_property(&mut self, element: &mut QualityElement, term: Term, prop: NodeId) -> Result<()> {
        match term {
            Term::NameOfMeasure => element.names_of_measure.extend(self.text(prop)),
            Term::MeasureIdentification => element.measure_identification = self.identifier(prop)?,
            Term::MeasureDescription => element.measure_description = self.text(prop),
            _ => {}
        }
        Ok(())
    }

    fn quality_result(&mut self, prop: NodeId) -> Result<Option<QualityResult>> {
        let accepted = [Term::DqConformanceResult, Term::DqQuantitativeResult];
        let Some(node) = self.element_of(prop, &accepted) else {
            return Ok(None);
        };
        if is(self.doc, &self.ctx, node, Term::DqConformanceResult) {
            return self.nested(|d| {
                let mut specification = None;
                let mut explanation = None;
                let mut pass = None;
                for (term, prop) in d.properties(node, Class::ConformanceResult) {
                    match term {
                        Term::Specification => specification = d.shared(prop, Self::citation)?,
                        Term::Explanation => explanation = d.text(prop),
                        Term::Pass => {
                            pass = primitive::read_boolean(d.doc, &d.ctx, prop, &mut d.warnings)
                        }
                        _ => {}
                    }
                }
                Ok(Some(QualityResult::Conformance {
                    specification,
                    explanation,
                    pass,
                }))
            });
        }
        self.nested(|d| {
            let mut value_unit = None;
            let mut values = Vec::new();
            for (term, prop) in d.properties(node, Class::QuantitativeResult) {
                match term {
                    Term::ValueUnit => value_unit = d.value_unit(prop)?,
                    Term::ResultValue => {
                        let value = primitive::read_number(d.doc, &d.ctx, prop, &mut d.warnings);
                        values.extend(d.recover(value).flatten());
                    }
                    _ => {}
                }
            }
            Ok(Some(QualityResult::Quantitative { value_unit, values }))
        })
    }

    /// The unit of a quantitative result: a pointer to a canonical unit, a
    /// reference to a unit definition elsewhere in the document or an
    /// inline definition.
    fn value_unit(&mut self, prop: NodeId) -> Result<Option<Unit>> {
        let doc = self.doc;
        if is_nil(doc, &self.ctx, prop) {
            return Ok(None);
        }
        if let Some(node) = first_child(doc, prop) {
            if !measure::is_definition(doc, node) {
                unexpected(doc, &mut self.warnings, prop, node);
                return Ok(None);
            }
            let gml = crate::dialect::Namespace::Gml.uri();
            if let Some(id) = doc.element(node).attribute(Some(gml), "id") {
                self.identities.declare(id, node, &mut self.warnings);
            }
            return Ok(self.recover(measure::read_definition(doc, node)));
        }
        let Some(target) = href(doc, prop) else {
            self.warnings
                .emit(MessageKey::NullValue, [doc.element(prop).name.local.as_str()]);
            return Ok(None);
        };
        let Some(id) = target.strip_prefix('#') else {
            let unit = measure::parse_unit(target)
                .map(|(unit, _)| unit)
                .ok_or_else(|| CodecError::UnknownUnit(target.to_string()));
            return Ok(self.recover(unit));
        };
        match self.identities.resolve(doc, id, &mut self.warnings) {
            Some(node) if measure::is_definition(doc, node) => {
                Ok(self.recover(measure::read_definition(doc, node)))
            }
            Some(node) => Err(CodecError::ReferenceTypeMismatch {
                id: id.to_string(),
                expected: "UnitDefinition".to_string(),
                found: display_name(&doc.element(node).name),
            }),
            None => {
                self.identities.dangling(id);
                Ok(None)
            }
        }
    }

    fn lineage(&mut self, node: NodeId) -> Result<Lineage> {
        let mut lineage = Lineage::default();
        for (term, prop) in self.properties(node, Class::Lineage) {
            match term {
                Term::Statement => lineage.statement = self.text(prop),
                Term::ProcessStep => {
                    let step = self.object(prop, Term::LiProcessStep, |d, step| {
                        Ok(ProcessStep {
                            description: d.step_description(step, Class::ProcessStep),
                        })
                    })?;
                    lineage.process_steps.extend(step);
                }
                Term::Source => {
                    let source = self.object(prop, Term::LiSource, |d, source| {
                        Ok(Source {
                            description: d.step_description(source, Class::Source),
                        })
                    })?;
                    lineage.sources.extend(source);
                }
                _ => {}
            }
        }
        Ok(lineage)
    }

    fn step_description(&mut self, node: NodeId, class: Class) -> Option<InternationalString> {
        let mut description = None;
        for (term, prop) in self.properties(node, class) {
            if term == Term::StepDescription {
                description = self.text(prop);
            }
        }
        description
    }
}

/// The value of a language or character set code, or of a plain string.
fn language_code(doc: &Document, node: NodeId) -> Option<String> {
    let element = doc.element(node);
    let value = element
        .attribute(None, "codeListValue")
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| element.text());
    (!value.is_empty()).then(|| value.to_string())
}
