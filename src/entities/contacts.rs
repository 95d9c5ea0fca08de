//! Contacts: customers, suppliers and carriers (`contatos`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::Entity;
use crate::repository::Identifier;

/// The contacts entity.
///
/// # Example
///
/// ```rust,ignore
/// use bling_api::entities::{Contact, Contacts, Entity, PersonType, TaxpayerKind};
///
/// let contact = Contact::new("Maria Silva", PersonType::Individual, "123.456.789-09");
/// let saved = Contacts::create(&repository, &contact).await?;
/// let fetched = Contacts::find(&repository, saved.data.id, None).await?;
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Contacts;

impl Entity for Contacts {
    type Payload = Contact;
    type Response = ContactResponse;
    type Filters = ContactFilters;
    type Infos = ContactInfos;

    const NAME: &'static str = "contato";
    const ENDPOINT: &'static str = "contatos";
}

/// Whether a contact is a person, a company or a foreigner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonType {
    /// Pessoa física.
    #[serde(rename = "F")]
    Individual,
    /// Pessoa jurídica.
    #[serde(rename = "J")]
    Company,
    /// Estrangeiro.
    #[serde(rename = "E")]
    Foreign,
}

/// State tax (ICMS) registration status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxpayerKind {
    /// Contribuinte do ICMS.
    #[serde(rename = "1")]
    Contributor,
    /// Contribuinte isento.
    #[serde(rename = "2")]
    Exempt,
    /// Não contribuinte.
    #[serde(rename = "9")]
    NonContributor,
}

/// A contact category, e.g. "Cliente" or "Fornecedor".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactKind {
    /// Category description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
}

/// Body sent when creating or replacing a contact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fantasia: Option<String>,
    pub tipo_pessoa: PersonType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contribuinte: Option<TaxpayerKind>,
    #[serde(rename = "cpf_cnpj")]
    pub cpf_cnpj: String,
    #[serde(rename = "ie_rg", skip_serializing_if = "Option::is_none")]
    pub ie_rg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endereco: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bairro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celular: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_nfe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub informacao_contato: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limite_credito: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pais_origem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obs: Option<String>,
    #[serde(rename = "tipos_contatos", default, skip_serializing_if = "Vec::is_empty")]
    pub tipos_contatos: Vec<ContactKind>,
}

impl Contact {
    /// Creates a contact with only the required fields set.
    #[must_use]
    pub fn new(nome: impl Into<String>, tipo_pessoa: PersonType, cpf_cnpj: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            fantasia: None,
            tipo_pessoa,
            contribuinte: None,
            cpf_cnpj: cpf_cnpj.into(),
            ie_rg: None,
            endereco: None,
            numero: None,
            complemento: None,
            bairro: None,
            cep: None,
            cidade: None,
            uf: None,
            fone: None,
            celular: None,
            email: None,
            email_nfe: None,
            informacao_contato: None,
            limite_credito: None,
            pais_origem: None,
            codigo: None,
            site: None,
            obs: None,
            tipos_contatos: Vec::new(),
        }
    }
}

/// A contact as returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: Identifier,
    #[serde(default)]
    pub codigo: Option<String>,
    pub nome: String,
    #[serde(default)]
    pub fantasia: Option<String>,
    #[serde(default)]
    pub tipo: Option<PersonType>,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub cnpj: Option<String>,
    #[serde(rename = "ie_rg", default)]
    pub ie_rg: Option<String>,
    #[serde(default)]
    pub endereco: Option<String>,
    #[serde(default)]
    pub numero: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub cidade: Option<String>,
    #[serde(default)]
    pub complemento: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub fone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub situacao: Option<String>,
    #[serde(default)]
    pub contribuinte: Option<TaxpayerKind>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub celular: Option<String>,
    #[serde(default)]
    pub data_alteracao: Option<String>,
    #[serde(default)]
    pub data_inclusao: Option<String>,
    #[serde(default)]
    pub sexo: Option<String>,
    #[serde(default)]
    pub cliente_desde: Option<String>,
    #[serde(default)]
    pub limite_credito: Option<String>,
    #[serde(default)]
    pub data_nascimento: Option<String>,
    #[serde(default)]
    pub informacoes_contato: Option<String>,
}

/// Query parameters for listing contacts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFilters {
    /// Page number, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagina: Option<u32>,
    /// Records per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limite: Option<u32>,
    /// Only contacts created on or after this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_inclusao: Option<NaiveDate>,
    /// Only contacts changed on or after this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_alteracao: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_pessoa: Option<PersonType>,
}

/// Query parameters for fetching one contact.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContactInfos {
    /// `"1"` looks the contact up by id, `"2"` by CPF/CNPJ.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identificador: Option<String>,
}
