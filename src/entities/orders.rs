//! Sales orders (`pedidos/vendas`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::{Entity, Reference};
use crate::repository::Identifier;

/// The sales orders entity.
///
/// List and find return the same [`Order`] shape that create and replace
/// send.
#[derive(Clone, Copy, Debug, Default)]
pub struct Orders;

impl Entity for Orders {
    type Payload = Order;
    type Response = Order;
    type Filters = OrderFilters;
    type Infos = OrderInfos;

    const NAME: &'static str = "pedido";
    const ENDPOINT: &'static str = "pedidos/vendas";
}

/// A sales order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Set by Bling; never sent on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero: Option<u64>,
    /// Order number in the store it came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_loja: Option<String>,
    #[serde(default, with = "crate::entities::bling_date", skip_serializing_if = "Option::is_none")]
    pub data: Option<NaiveDate>,
    #[serde(default, with = "crate::entities::bling_date", skip_serializing_if = "Option::is_none")]
    pub data_saida: Option<NaiveDate>,
    #[serde(default, with = "crate::entities::bling_date", skip_serializing_if = "Option::is_none")]
    pub data_prevista: Option<NaiveDate>,
    #[serde(default)]
    pub contato: OrderCustomer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loja: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natureza_operacao: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendedor: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transporte: Option<OrderTransport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub itens: Vec<OrderItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parcelas: Vec<OrderInstallment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outras_despesas: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes_internas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_pedido_compra: Option<String>,
}

/// The contact an order is billed to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomer {
    /// Id of an existing contact; when set, the other fields are optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_pessoa: Option<String>,
    /// CPF or CNPJ.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_documento: Option<String>,
}

/// Shipping details.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTransport {
    /// Who pays the freight: 0 sender, 1 recipient, 2 third party, 9 none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frete_por_conta: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frete: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantidade_volumes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peso_bruto: Option<f64>,
}

/// One line of an order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    #[serde(default)]
    pub descricao: String,
    /// Unit of measure, e.g. `"UN"`, `"PC"` or `"CX"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unidade: Option<String>,
    #[serde(default)]
    pub quantidade: f64,
    #[serde(default)]
    pub valor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desconto: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produto: Option<Reference>,
}

/// One installment of an order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInstallment {
    #[serde(default, with = "crate::entities::bling_date", skip_serializing_if = "Option::is_none")]
    pub data_vencimento: Option<NaiveDate>,
    #[serde(default)]
    pub valor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forma_pagamento: Option<Reference>,
}

/// Query parameters for listing orders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagina: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limite: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_emissao: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_alteracao: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_prevista: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_situacao: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_contato: Option<u64>,
}

/// Query parameters for fetching one order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OrderInfos {
    /// Include the order's status history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historico: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_serializes_camel_case_fields() {
        let order = Order {
            data: NaiveDate::from_ymd_opt(2024, 5, 2),
            numero_loja: Some("L-9".to_string()),
            contato: OrderCustomer {
                nome: "Maria Silva".to_string(),
                tipo_pessoa: Some("F".to_string()),
                ..Default::default()
            },
            itens: vec![OrderItem {
                descricao: "Copo do Bling".to_string(),
                unidade: Some("UN".to_string()),
                quantidade: 2.0,
                valor: 10.5,
                ..Default::default()
            }],
            transporte: Some(OrderTransport {
                frete: Some(15.0),
                ..Default::default()
            }),
            observacoes_internas: Some("Cliente VIP".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&order).unwrap();

        assert_eq!(value["data"], json!("2024-05-02"));
        assert_eq!(value["numeroLoja"], json!("L-9"));
        assert_eq!(value["contato"]["tipoPessoa"], json!("F"));
        assert_eq!(value["itens"][0]["valor"], json!(10.5));
        assert_eq!(value["transporte"]["frete"], json!(15.0));
        assert_eq!(value["observacoesInternas"], json!("Cliente VIP"));
        assert!(value.get("id").is_none());
        assert!(value.get("dataSaida").is_none());
    }

    #[test]
    fn test_order_reads_v3_body() {
        let order: Order = serde_json::from_value(json!({
            "id": 1,
            "numero": 12,
            "numeroLoja": "L-9",
            "dataSaida": "2024-01-02",
            "contato": {"id": 3, "nome": "x", "numeroDocumento": "123.456.789-09"},
            "naturezaOperacao": {"id": 7},
            "itens": [{"descricao": "Copo", "quantidade": 1, "valor": 5.5, "produto": {"id": 8}}],
            "parcelas": [{"dataVencimento": "2024-02-02", "valor": 5.5, "formaPagamento": {"id": 4}}]
        }))
        .unwrap();

        assert_eq!(order.id, Some(Identifier::Number(1)));
        assert_eq!(order.numero, Some(12));
        assert_eq!(order.numero_loja.as_deref(), Some("L-9"));
        assert_eq!(order.data_saida, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(order.contato.id, Some(3));
        assert_eq!(order.contato.numero_documento.as_deref(), Some("123.456.789-09"));
        assert_eq!(order.natureza_operacao, Some(Reference { id: 7 }));
        assert_eq!(order.itens[0].produto, Some(Reference { id: 8 }));
        assert_eq!(order.parcelas[0].data_vencimento, NaiveDate::from_ymd_opt(2024, 2, 2));
        assert_eq!(order.parcelas[0].forma_pagamento, Some(Reference { id: 4 }));
    }

    #[test]
    fn test_order_unset_dates_read_as_none() {
        let order: Order = serde_json::from_value(json!({
            "id": 1,
            "data": "0000-00-00",
            "dataPrevista": "0000-00-00",
            "contato": {"nome": "x"},
            "parcelas": [{"dataVencimento": "0000-00-00", "valor": 1.0}]
        }))
        .unwrap();

        assert_eq!(order.data, None);
        assert_eq!(order.data_prevista, None);
        assert_eq!(order.parcelas[0].data_vencimento, None);
        assert_eq!(order.contato.nome, "x");
    }

    #[test]
    fn test_order_filters_and_infos() {
        let filters = OrderFilters {
            id_contato: Some(12),
            data_emissao: NaiveDate::from_ymd_opt(2024, 1, 31),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&filters).unwrap(),
            json!({"idContato": 12, "dataEmissao": "2024-01-31"})
        );

        let infos = OrderInfos {
            historico: Some(true),
        };
        assert_eq!(serde_json::to_value(infos).unwrap(), json!({"historico": true}));
    }
}
